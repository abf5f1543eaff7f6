use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Root directory holding one subdirectory per category.
    pub base_folder: PathBuf,
    pub players_dir: PathBuf,
    /// Reserved subdirectory of `base_folder` shown on the welcome screen.
    pub highlights_folder: String,
    pub highlights_count: usize,
    pub image_patterns: Vec<String>,
    /// Wrong attempts after which a hint is suggested. Never forces a skip.
    pub max_attempts: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_folder: PathBuf::from("Kategorier"),
            players_dir: PathBuf::from("players"),
            highlights_folder: "manedens_tegn".to_string(),
            highlights_count: 4,
            image_patterns: vec![
                "*.png".to_string(),
                "*.jpg".to_string(),
                "*.jpeg".to_string(),
            ],
            max_attempts: 3,
        }
    }
}

impl AppConfig {
    pub fn with_base_folder(mut self, path: impl AsRef<Path>) -> Self {
        self.base_folder = path.as_ref().to_path_buf();
        self
    }

    pub fn with_players_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.players_dir = path.as_ref().to_path_buf();
        self
    }
}

/// Defaults, then an optional `Config.toml`, then `SIGN_QUIZ_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    load_from("Config")
}

pub fn load_from(file_stem: &str) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default(
            "base_folder",
            defaults.base_folder.to_string_lossy().into_owned(),
        )?
        .set_default(
            "players_dir",
            defaults.players_dir.to_string_lossy().into_owned(),
        )?
        .set_default("highlights_folder", defaults.highlights_folder)?
        .set_default("highlights_count", defaults.highlights_count as i64)?
        .set_default("image_patterns", defaults.image_patterns)?
        .set_default("max_attempts", defaults.max_attempts as i64)?
        .add_source(ConfigFile::with_name(file_stem).required(false))
        .add_source(
            Environment::with_prefix("SIGN_QUIZ")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("image_patterns"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
