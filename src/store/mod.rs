//! CollectionStore - CRUD over named record collections.
//!
//! Each collection is one JSON array stored under one backend key. Every
//! operation reads the whole array, works on it in memory and, for
//! mutations, writes the whole array back. There is no index: lookups and
//! filters are linear scans. That is fine for the tens to low thousands of
//! records these collections hold, and is the scaling limit of the store.
//!
//! ## Failure policy
//!
//! - Reads never fail. A missing key, an unavailable backend, unparsable
//!   stored JSON or a stored object that does not decode as the model all
//!   degrade to fewer (or no) results, with a warning logged for bad data.
//! - Mutations, including `clear` and `clear_all`, return
//!   [`StoreError::BackendUnavailable`] when no backend is attached rather
//!   than dropping data.
//! - Unparsable stored JSON is left in place until the next successful write
//!   to that collection replaces it.
//!
//! ## Concurrency
//!
//! Mutations on one store are serialized by an internal lock, so each
//! read-modify-write is atomic with respect to other callers of the same
//! store. Separate stores over one shared backend (two browser tabs) are not
//! coordinated: the last writer wins and concurrent updates can be lost.

mod collection;
mod keys;
mod raw;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::backend::Backend;
use crate::config::{SeedPolicy, StoreConfig};
use crate::error::StoreError;
use crate::model::{
    generate_id, json_kind, Clock, Model, Record, SystemClock, RESERVED_FIELDS, UPDATED_AT_FIELD,
};
use crate::query::{matches, Criteria};

pub use collection::Collection;
pub use keys::KeyMap;
pub(crate) use raw::{StoredCollection, StoredState};

/// Generic CRUD engine over named collections persisted through a [`Backend`].
pub struct CollectionStore<B: Backend> {
    backend: B,
    keys: KeyMap,
    clock: Arc<dyn Clock>,
    seed_policy: SeedPolicy,
    write_lock: Mutex<()>,
}

impl<B: Backend> CollectionStore<B> {
    /// Create a store with the default configuration (`db_` key prefix).
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self {
            backend,
            keys: KeyMap::new(&config),
            clock: Arc::new(SystemClock),
            seed_policy: config.seed_policy,
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the clock used for `createdAt`/`updatedAt`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed_policy
    }

    /// Whether a persistent backend is attached.
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Typed accessor for one collection.
    pub fn collection<M: Model>(&self) -> Collection<'_, B, M> {
        Collection::new(self)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Every record in the collection, in stored order.
    pub fn get_all<M: Model>(&self) -> Vec<Record<M>> {
        self.load(M::COLLECTION).decode()
    }

    pub fn get_by_id<M: Model>(&self, id: &str) -> Option<Record<M>> {
        let stored = self.load(M::COLLECTION);
        let index = stored.position(id)?;
        StoredCollection::decode_doc(&stored.docs[index])
    }

    /// Records whose fields equal every criteria value, in stored order.
    pub fn get_by<M: Model>(&self, criteria: &Criteria) -> Vec<Record<M>> {
        self.load(M::COLLECTION)
            .docs
            .iter()
            .filter(|doc| matches(doc, criteria))
            .filter_map(StoredCollection::decode_doc::<M>)
            .collect()
    }

    /// First record matching `criteria`, in stored order.
    pub fn get_first<M: Model>(&self, criteria: &Criteria) -> Option<Record<M>> {
        self.load(M::COLLECTION)
            .docs
            .iter()
            .filter(|doc| matches(doc, criteria))
            .find_map(StoredCollection::decode_doc::<M>)
    }

    pub fn count<M: Model>(&self) -> usize {
        self.get_all::<M>().len()
    }

    /// Whether the collection has ever been written (its key is present).
    pub fn is_populated<M: Model>(&self) -> bool {
        self.load(M::COLLECTION).state != StoredState::Absent
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Insert a new record with a fresh id and both timestamps set to now.
    pub fn create<M: Model>(&self, fields: M) -> Result<Record<M>, StoreError> {
        let _guard = self.begin("create")?;
        let mut stored = self.load(M::COLLECTION);
        let record = append(&mut stored, fields, self.clock.now())?;
        self.persist(M::COLLECTION, &stored.docs)?;
        Ok(record)
    }

    /// Insert several records with one read and one write.
    pub fn create_many<M: Model>(
        &self,
        fields: impl IntoIterator<Item = M>,
    ) -> Result<Vec<Record<M>>, StoreError> {
        let _guard = self.begin("create")?;
        let mut stored = self.load(M::COLLECTION);
        let now = self.clock.now();
        let created = fields
            .into_iter()
            .map(|data| append(&mut stored, data, now))
            .collect::<Result<Vec<_>, _>>()?;
        self.persist(M::COLLECTION, &stored.docs)?;
        Ok(created)
    }

    /// Shallow-merge `changes` into the record with `id` and refresh its
    /// `updatedAt`. Returns `None` (and writes nothing) if there is no such
    /// record.
    pub fn update<M: Model>(
        &self,
        id: &str,
        changes: &M::Patch,
    ) -> Result<Option<Record<M>>, StoreError> {
        let changes = changes_object::<M, _>(changes)?;
        let _guard = self.begin("update")?;
        let mut stored = self.load(M::COLLECTION);

        let index = match stored.position(id) {
            Some(index) => index,
            None => return Ok(None),
        };
        let now = self.clock.now();
        let updated = match apply_changes::<M>(&mut stored.docs[index], &changes, now)? {
            Some(record) => record,
            None => return Ok(None),
        };

        self.persist(M::COLLECTION, &stored.docs)?;
        Ok(Some(updated))
    }

    /// Apply `changes` to every record matching `criteria`. Returns how many
    /// records were touched.
    pub fn update_by<M: Model>(
        &self,
        criteria: &Criteria,
        changes: &M::Patch,
    ) -> Result<usize, StoreError> {
        let changes = changes_object::<M, _>(changes)?;
        let _guard = self.begin("update")?;
        let mut stored = self.load(M::COLLECTION);
        let now = self.clock.now();

        let mut touched = 0;
        for doc in stored.docs.iter_mut().filter(|doc| matches(doc, criteria)) {
            if apply_changes::<M>(doc, &changes, now)?.is_some() {
                touched += 1;
            }
        }

        if touched > 0 {
            self.persist(M::COLLECTION, &stored.docs)?;
        }
        Ok(touched)
    }

    /// Remove the record with `id`. Returns whether one was removed.
    pub fn delete<M: Model>(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.begin("delete")?;
        let mut stored = self.load(M::COLLECTION);

        let before = stored.docs.len();
        stored.docs.retain(|doc| raw::doc_id(doc) != Some(id));
        if stored.docs.len() == before {
            return Ok(false);
        }

        self.persist(M::COLLECTION, &stored.docs)?;
        Ok(true)
    }

    /// Remove every record matching `criteria`. Returns how many were removed.
    pub fn delete_by<M: Model>(&self, criteria: &Criteria) -> Result<usize, StoreError> {
        let _guard = self.begin("delete")?;
        let mut stored = self.load(M::COLLECTION);

        let before = stored.docs.len();
        stored.docs.retain(|doc| !matches(doc, criteria));
        let removed = before - stored.docs.len();

        if removed > 0 {
            self.persist(M::COLLECTION, &stored.docs)?;
        }
        Ok(removed)
    }

    /// Remove the whole collection, key included.
    pub fn clear<M: Model>(&self) -> Result<(), StoreError> {
        self.clear_collection(M::COLLECTION)
    }

    /// Remove a collection by logical name.
    pub fn clear_collection(&self, collection: &str) -> Result<(), StoreError> {
        let _guard = self.begin("clear")?;
        self.remove(collection)
    }

    /// Remove every known collection: those listed in the configuration and
    /// those touched through this store.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let _guard = self.begin("clear")?;
        for collection in self.keys.known() {
            self.remove(&collection)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals shared with the seeder
    // ------------------------------------------------------------------

    /// Availability check plus the store-wide write lock.
    pub(crate) fn begin(&self, operation: &'static str) -> Result<MutexGuard<'_, ()>, StoreError> {
        if !self.backend.is_available() {
            return Err(StoreError::BackendUnavailable { operation });
        }
        self.write_lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    pub(crate) fn load(&self, collection: &str) -> StoredCollection {
        let key = self.keys.key_for(collection);
        StoredCollection::parse(&key, self.backend.read(&key))
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(crate) fn persist(
        &self,
        collection: &str,
        docs: &[Map<String, Value>],
    ) -> Result<(), StoreError> {
        let key = self.keys.key_for(collection);
        let json = serde_json::to_string(docs)?;
        self.backend.write(&key, &json)?;
        debug!("{}: wrote {} records", key, docs.len());
        Ok(())
    }

    fn remove(&self, collection: &str) -> Result<(), StoreError> {
        let key = self.keys.key_for(collection);
        self.backend.remove(&key)?;
        debug!("{}: removed", key);
        Ok(())
    }
}

/// Append a new record for `data` to `stored`. Nothing is persisted here.
pub(crate) fn append<M: Model>(
    stored: &mut StoredCollection,
    data: M,
    now: DateTime<Utc>,
) -> Result<Record<M>, StoreError> {
    let id = generate_id(|candidate| stored.contains_id(candidate));
    let record = Record {
        id,
        created_at: now,
        updated_at: now,
        data,
    };
    let doc = record.to_document()?;
    Record::<M>::from_document(&doc).map_err(|err| {
        StoreError::Serde(format!(
            "{}: record does not read back as stored ({})",
            M::COLLECTION,
            err
        ))
    })?;
    stored.docs.push(doc);
    Ok(record)
}

/// Serialize a change set and drop the fields the store owns.
fn changes_object<M: Model, P: Serialize>(changes: &P) -> Result<Map<String, Value>, StoreError> {
    let mut map = match serde_json::to_value(changes)? {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::Serde(format!(
                "{}: changes must serialize to an object, got {}",
                M::COLLECTION,
                json_kind(&other)
            )))
        }
    };
    for field in RESERVED_FIELDS {
        if map.remove(field).is_some() {
            warn!("{}: ignoring change to managed field {}", M::COLLECTION, field);
        }
    }
    Ok(map)
}

/// Merge `changes` into one stored object.
///
/// Returns `None` and leaves the object alone if it does not decode as `M`
/// (reads skip such objects too). A merge that no longer decodes is an error
/// and nothing is written.
fn apply_changes<M: Model>(
    doc: &mut Map<String, Value>,
    changes: &Map<String, Value>,
    now: DateTime<Utc>,
) -> Result<Option<Record<M>>, StoreError> {
    let current = match StoredCollection::decode_doc::<M>(doc) {
        Some(record) => record,
        None => return Ok(None),
    };
    let stamp = now.max(current.created_at);

    let mut merged = doc.clone();
    for (field, value) in changes {
        merged.insert(field.clone(), value.clone());
    }
    merged.insert(UPDATED_AT_FIELD.to_string(), serde_json::to_value(stamp)?);

    let record = Record::<M>::from_document(&merged)?;
    *doc = merged;
    Ok(Some(record))
}
