use std::fmt;

use crate::backend::BackendError;

/// Error type for collection store operations.
///
/// Absence is never an error: lookups return `Option`, deletes return
/// `bool` or a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A mutating operation ran with no persistent backend attached.
    BackendUnavailable { operation: &'static str },
    /// The backend refused a write or remove.
    Backend(BackendError),
    /// A record or change set could not be converted to or from JSON.
    Serde(String),
    /// Configuration could not be loaded.
    Config(String),
    /// The store's write lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::BackendUnavailable { operation } => write!(
                f,
                "cannot {} without a persistent storage backend",
                operation
            ),
            StoreError::Backend(err) => write!(f, "storage backend error: {}", err),
            StoreError::Serde(msg) => write!(f, "record serialization error: {}", msg),
            StoreError::Config(msg) => write!(f, "configuration error: {}", msg),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        StoreError::Backend(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
