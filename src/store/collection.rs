//! Collection - typed accessor for one collection's CRUD operations.

use std::marker::PhantomData;

use crate::backend::Backend;
use crate::error::StoreError;
use crate::model::{Model, Record};
use crate::query::Criteria;

use super::CollectionStore;

/// Typed view of one collection on a [`CollectionStore`].
pub struct Collection<'a, B: Backend, M> {
    store: &'a CollectionStore<B>,
    _marker: PhantomData<M>,
}

impl<'a, B: Backend, M: Model> Collection<'a, B, M> {
    pub fn new(store: &'a CollectionStore<B>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &'a CollectionStore<B> {
        self.store
    }

    /// Logical collection name.
    pub fn name(&self) -> &'static str {
        M::COLLECTION
    }

    /// Get all records.
    pub fn get_all(&self) -> Vec<Record<M>> {
        self.store.get_all()
    }

    /// Get a record by ID.
    pub fn get(&self, id: &str) -> Option<Record<M>> {
        self.store.get_by_id(id)
    }

    /// Records matching criteria.
    pub fn get_by(&self, criteria: &Criteria) -> Vec<Record<M>> {
        self.store.get_by(criteria)
    }

    pub fn get_first(&self, criteria: &Criteria) -> Option<Record<M>> {
        self.store.get_first(criteria)
    }

    /// Records whose fields equal every field set in `fields`.
    pub fn find(&self, fields: &M::Patch) -> Vec<Record<M>> {
        self.store.get_by(&Criteria::matching(fields))
    }

    pub fn find_first(&self, fields: &M::Patch) -> Option<Record<M>> {
        self.store.get_first(&Criteria::matching(fields))
    }

    pub fn count(&self) -> usize {
        self.store.count::<M>()
    }

    pub fn is_populated(&self) -> bool {
        self.store.is_populated::<M>()
    }

    /// Insert a new record.
    pub fn create(&self, fields: M) -> Result<Record<M>, StoreError> {
        self.store.create(fields)
    }

    pub fn create_many(&self, fields: impl IntoIterator<Item = M>) -> Result<Vec<Record<M>>, StoreError> {
        self.store.create_many(fields)
    }

    /// Merge changes into a record by ID.
    pub fn update(&self, id: &str, changes: &M::Patch) -> Result<Option<Record<M>>, StoreError> {
        self.store.update::<M>(id, changes)
    }

    pub fn update_by(&self, criteria: &Criteria, changes: &M::Patch) -> Result<usize, StoreError> {
        self.store.update_by::<M>(criteria, changes)
    }

    /// Delete a record by ID. Returns true if it existed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete::<M>(id)
    }

    pub fn delete_by(&self, criteria: &Criteria) -> Result<usize, StoreError> {
        self.store.delete_by::<M>(criteria)
    }

    /// Remove the whole collection.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.clear::<M>()
    }
}
