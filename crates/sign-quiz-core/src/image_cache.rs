use crate::error::Error;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Owns display handles keyed by image path for the life of a run.
///
/// Entries are filled on first access and never evicted. Failed loads are not cached.
pub struct ImageCache<H> {
    handles: HashMap<PathBuf, H>,
}

impl<H> Default for ImageCache<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> ImageCache<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load<F>(&mut self, path: &Path, load: F) -> Result<&H, Error>
    where
        F: FnOnce(&Path) -> Result<H, Error>,
    {
        match self.handles.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => {
                trace!("Found handle for {} in cache", path.display());
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let handle = load(path)?;
                trace!("No handle for {} in cache, adding", path.display());
                Ok(entry.insert(handle))
            }
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.handles.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
