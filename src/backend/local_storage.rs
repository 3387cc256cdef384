//! LocalStorageBackend - browser `window.localStorage` via web-sys.

use wasm_bindgen::JsValue;
use web_sys::{window, Storage};

use super::{Backend, BackendError};

/// Browser local storage. The storage object is looked up on every call, so
/// the backend itself holds no JS handles and is `Send + Sync`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        window()?.local_storage().ok().flatten()
    }
}

fn rejected(err: JsValue) -> BackendError {
    BackendError::Rejected(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl Backend for LocalStorageBackend {
    fn is_available(&self) -> bool {
        Self::storage().is_some()
    }

    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        match Self::storage() {
            Some(storage) => storage.set_item(key, value).map_err(rejected),
            None => Ok(()),
        }
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        match Self::storage() {
            Some(storage) => storage.remove_item(key).map_err(rejected),
            None => Ok(()),
        }
    }

    fn keys(&self) -> Vec<String> {
        let storage = match Self::storage() {
            Some(storage) => storage,
            None => return Vec::new(),
        };
        let len = storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .collect()
    }
}
