//! FileBackend - one JSON file per key, for native hosts.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{Backend, BackendError};

/// File-based storage: the value for `key` lives in `<base_dir>/<key>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never sees half a collection.
#[derive(Clone, Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a file backend rooted at `base_dir`. The directory is created on
    /// first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl Backend for FileBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!("failed to read {:?}: {}", path, err);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        fs::create_dir_all(&self.base_dir)
            .map_err(|e| BackendError::Io(format!("failed to create {:?}: {}", self.base_dir, e)))?;

        let path = self.path_for(key);
        let tmp = self.base_dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)
            .map_err(|e| BackendError::Io(format!("failed to write {:?}: {}", tmp, e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| BackendError::Io(format!("failed to replace {:?}: {}", path, e)))?;

        debug!("wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("removed {:?}", path);
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BackendError::Io(format!(
                "failed to remove {:?}: {}",
                path, err
            ))),
        }
    }

    fn keys(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        keys.sort();
        keys
    }
}
