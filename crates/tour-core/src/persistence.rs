//! Session state carried across visits through a durable key-value store.
//!
//! Values are stored as text under fixed keys. A missing or unreadable key
//! loads as zero.

use std::collections::BTreeMap;

use crate::constants::{KEY_CAMERA_YAW, KEY_PATH_POS, KEY_PROGRESSION};
use crate::error::Result;
use crate::path::wrap;

/// Process-wide durable string store (browser localStorage, a file, ...).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store for tests and hosts without persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PersistedSession {
    pub yaw: f32,
    pub path_position: f32,
    /// Completed painting visits across all sessions.
    pub progression: u32,
}

impl PersistedSession {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let yaw = read_number::<f32>(store, KEY_CAMERA_YAW)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        let path_position = read_number::<f32>(store, KEY_PATH_POS)
            .map(|v| wrap(v, 0.0, 1.0))
            .unwrap_or(0.0);
        let progression = read_number::<u32>(store, KEY_PROGRESSION).unwrap_or(0);
        Self {
            yaw,
            path_position,
            progression,
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(KEY_CAMERA_YAW, &self.yaw.to_string())?;
        store.set(KEY_PATH_POS, &self.path_position.to_string())?;
        store.set(KEY_PROGRESSION, &self.progression.to_string())?;
        Ok(())
    }
}

fn read_number<T: std::str::FromStr>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[store] ignoring unreadable '{}' = {:?}", key, raw);
            None
        }
    }
}
