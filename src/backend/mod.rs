//! Key-value persistence adapters.
//!
//! A backend stores whole serialized collections as strings under string
//! keys. It knows nothing about records; the [`CollectionStore`] does all
//! parsing and rewriting on top of it.
//!
//! Reads never fail: an unreadable value is reported as absent. Writes and
//! removes are no-ops on a backend that is not available, and the store
//! refuses to call them in that state anyway.
//!
//! [`CollectionStore`]: crate::CollectionStore

mod file;
mod in_memory;
#[cfg(feature = "web")]
mod local_storage;
mod unavailable;

use std::fmt;
use std::sync::Arc;

pub use file::FileBackend;
pub use in_memory::InMemoryBackend;
#[cfg(feature = "web")]
pub use local_storage::LocalStorageBackend;
pub use unavailable::UnavailableBackend;

/// A flat string key to string value store.
pub trait Backend: Send + Sync {
    /// True only when a concrete persistent store is attached.
    fn is_available(&self) -> bool;

    /// Raw stored value, or `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Delete the value stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<(), BackendError>;

    /// All keys currently stored. Backends that cannot enumerate return nothing.
    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Error type for backend writes and removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Filesystem failure.
    Io(String),
    /// The host storage rejected the operation (quota, security policy).
    Rejected(String),
    /// The in-process storage lock was poisoned.
    Poisoned,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Io(msg) => write!(f, "io error: {}", msg),
            BackendError::Rejected(msg) => write!(f, "storage rejected the operation: {}", msg),
            BackendError::Poisoned => write!(f, "storage lock poisoned"),
        }
    }
}

impl std::error::Error for BackendError {}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

/// The backend for the current execution context: browser local storage when
/// built for the web, the unavailable stub everywhere else.
pub fn default_backend() -> Box<dyn Backend> {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    {
        Box::new(LocalStorageBackend::new())
    }
    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    {
        Box::new(UnavailableBackend)
    }
}
