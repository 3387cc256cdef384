use super::{Backend, BackendError};

/// Stand-in backend for contexts with no persistent storage (server side,
/// headless tools). Reads find nothing and writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableBackend;

impl Backend for UnavailableBackend {
    fn is_available(&self) -> bool {
        false
    }

    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), BackendError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), BackendError> {
        Ok(())
    }
}
