use drift_engine::{PoemStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Poem store backed by the page's `localStorage`.
///
/// Private browsing modes may deny storage entirely; every call then
/// fails with `StoreError::Unavailable` and the display keeps its defaults.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; custom poems will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(key: &str, err: JsValue) -> StoreError {
    StoreError::Rejected {
        key: key.to_string(),
        reason: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    }
}

impl PoemStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(|e| rejected(key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(|e| rejected(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?.remove_item(key).map_err(|e| rejected(key, e))
    }
}
