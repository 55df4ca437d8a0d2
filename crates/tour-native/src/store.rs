use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tour_core::{KeyValueStore, TourError};

/// Session keys kept in a small JSON object on disk.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// A missing file is an empty store; an unreadable one is replaced on
    /// the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("[store] ignoring {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> tour_core::Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)
            .map_err(|e| TourError::Storage(format!("{}: {e}", self.path.display())))
    }
}
