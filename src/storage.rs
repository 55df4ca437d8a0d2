use tour_core::{KeyValueStore, TourError};
use web_sys as web;

/// `window.localStorage`, or nothing when the browser refuses access
/// (private mode, disabled storage). Without storage every read misses and
/// every write fails with [`TourError::Storage`].
pub struct LocalStore {
    storage: Option<web::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[store] localStorage unavailable; the session will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> tour_core::Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| TourError::Storage("localStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| TourError::Storage(format!("{key}: {e:?}")))
    }
}
