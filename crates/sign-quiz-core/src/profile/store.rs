use super::models::{LoadedProfile, PartialRecord, PlayerProfile};
use crate::error::Error;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const RECORD_EXTENSION: &str = "json";
const BACKUP_SUFFIX: &str = "_backup";

/// One JSON record per player, named `<player>.json`, inside a single directory.
///
/// No locking: two processes sharing a directory may race on writes.
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!("Player records stored in {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self, name: &str) -> bool {
        self.record_path(name).is_file()
    }

    pub fn create(&self, name: &str) -> Result<PlayerProfile, Error> {
        let name = validate_name(name)?;
        if self.exists(name) {
            return Err(Error::PlayerExists(name.to_string()));
        }
        let profile = PlayerProfile::new(name);
        self.save(&profile)?;
        info!("Created player {}", name);
        Ok(profile)
    }

    /// Missing file and unparsable file fail differently. Absent fields do not fail.
    pub fn load(&self, name: &str) -> Result<LoadedProfile, Error> {
        let name = validate_name(name)?;
        let path = self.record_path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::PlayerNotFound(name.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let partial: PartialRecord =
            serde_json::from_str(&contents).map_err(|source| Error::CorruptProfile {
                name: name.to_string(),
                source,
            })?;
        let (record, missing) = partial.complete();
        if !missing.is_empty() {
            warn!(
                "Player record for {} is missing: {}",
                name,
                missing.join(", ")
            );
        }

        info!("Loaded player {}", name);
        Ok(LoadedProfile {
            profile: PlayerProfile::from_record(name, record),
            missing,
        })
    }

    /// Full overwrite of the player's record.
    pub fn save(&self, profile: &PlayerProfile) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(&profile.to_record())?;
        fs::write(self.record_path(&profile.name), json)?;
        debug!("Progress saved for {}", profile.name);
        Ok(())
    }

    /// Copy the persisted record to `<name>_backup.json`.
    /// Returns `false` when there was nothing on disk to copy.
    pub fn backup(&self, name: &str) -> Result<bool, Error> {
        let source = self.record_path(name);
        if !source.is_file() {
            return Ok(false);
        }
        fs::copy(&source, self.backup_path(name))?;
        info!("Backup written for {}", name);
        Ok(true)
    }

    pub fn delete(&self, name: &str) -> Result<(), Error> {
        let name = validate_name(name)?;
        match fs::remove_file(self.record_path(name)) {
            Ok(()) => {
                info!("Deleted player {}", name);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::PlayerNotFound(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Names of all player records. Backup records are not players.
    pub fn list(&self) -> Result<BTreeSet<String>, Error> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.ends_with(BACKUP_SUFFIX) {
                    names.insert(stem.to_string());
                }
            }
        }
        Ok(names)
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, RECORD_EXTENSION))
    }

    fn backup_path(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", name, BACKUP_SUFFIX, RECORD_EXTENSION))
    }
}

/// Names double as file names, so they must be non-empty and path-free.
pub fn validate_name(name: &str) -> Result<&str, Error> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed.contains(['/', '\\'])
        || trimmed.contains("..")
        || trimmed.ends_with(BACKUP_SUFFIX);
    if invalid {
        return Err(Error::InvalidPlayerName(name.to_string()));
    }
    Ok(trimmed)
}
