use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use crate::config::StoreConfig;

/// Maps logical collection names to storage keys.
///
/// A collection's key is its explicit override if configured, otherwise the
/// prefix followed by the name (`"coins"` -> `"db_coins"`). Every name that
/// passes through is remembered so `clear_all` can find it.
#[derive(Debug)]
pub struct KeyMap {
    prefix: String,
    overrides: BTreeMap<String, String>,
    known: RwLock<BTreeSet<String>>,
}

impl KeyMap {
    pub fn new(config: &StoreConfig) -> Self {
        let known = config.collections.iter().cloned().collect();
        Self {
            prefix: config.key_prefix.clone(),
            overrides: config.keys.clone(),
            known: RwLock::new(known),
        }
    }

    /// Storage key for `collection`, registering the collection as known.
    pub fn key_for(&self, collection: &str) -> String {
        self.register(collection);
        self.resolve(collection)
    }

    /// Storage key for `collection` without registering it.
    pub fn resolve(&self, collection: &str) -> String {
        match self.overrides.get(collection) {
            Some(key) => key.clone(),
            None => format!("{}{}", self.prefix, collection),
        }
    }

    pub fn register(&self, collection: &str) {
        let mut known = match self.known.write() {
            Ok(known) => known,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !known.contains(collection) {
            known.insert(collection.to_string());
        }
    }

    /// Every known collection name, sorted.
    pub fn known(&self) -> Vec<String> {
        match self.known.read() {
            Ok(known) => known.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}
