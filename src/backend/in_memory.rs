//! InMemoryBackend - HashMap-backed storage for tests and headless hosts.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Backend, BackendError};

/// In-memory key-value storage.
///
/// Clone-friendly via Arc: clones share the same map, which is how two
/// execution contexts over one browser storage are modelled in tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBackend {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for InMemoryBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn read(&self, key: &str) -> Option<String> {
        let storage = self.storage.read().ok()?;
        storage.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut storage = self.storage.write().map_err(|_| BackendError::Poisoned)?;
        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let mut storage = self.storage.write().map_err(|_| BackendError::Poisoned)?;
        storage.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        match self.storage.read() {
            Ok(storage) => {
                let mut keys: Vec<String> = storage.keys().cloned().collect();
                keys.sort();
                keys
            }
            Err(_) => Vec::new(),
        }
    }
}
