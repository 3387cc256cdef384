//! Store configuration, loadable from TOML.
//!
//! ```toml
//! key_prefix = "db_"
//! collections = ["users", "coins", "balances"]
//! seed_policy = "key_absent"
//!
//! [keys]
//! cart = "cart"
//! notifications = "coinbase_notifications"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const DEFAULT_KEY_PREFIX: &str = "db_";

/// When the seeder treats a collection as needing its default records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Seed only if the collection was never written (its key is absent) or
    /// its stored value is unreadable. Deleting every record is respected.
    #[default]
    KeyAbsent,
    /// Seed whenever the collection currently holds no records.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Prefix joined to a logical collection name to form its storage key.
    pub key_prefix: String,
    /// Explicit storage keys for individual collections.
    pub keys: BTreeMap<String, String>,
    /// Collections known up front; `clear_all` covers these plus every
    /// collection touched through the store.
    pub collections: Vec<String>,
    pub seed_policy: SeedPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            keys: BTreeMap::new(),
            collections: Vec::new(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, StoreError> {
        toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("failed to read {:?}: {}", path, e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Store `collection` under exactly `key`, bypassing the prefix.
    pub fn with_key(mut self, collection: impl Into<String>, key: impl Into<String>) -> Self {
        self.keys.insert(collection.into(), key.into());
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        if !self.collections.contains(&collection) {
            self.collections.push(collection);
        }
        self
    }

    pub fn with_seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }
}
