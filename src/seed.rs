//! Default content for collections on first use.

use log::info;

use crate::backend::Backend;
use crate::config::SeedPolicy;
use crate::error::StoreError;
use crate::model::{Model, Record};
use crate::store::{append, CollectionStore, StoredState};

/// Result of [`CollectionStore::ensure_seeded`].
#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome<M> {
    /// The defaults were written; these are the records created.
    Seeded(Vec<Record<M>>),
    /// The collection already counted as initialized; nothing was written.
    AlreadySeeded,
}

impl<M> SeedOutcome<M> {
    pub fn was_seeded(&self) -> bool {
        matches!(self, SeedOutcome::Seeded(_))
    }

    pub fn seeded_count(&self) -> usize {
        match self {
            SeedOutcome::Seeded(records) => records.len(),
            SeedOutcome::AlreadySeeded => 0,
        }
    }
}

impl<B: Backend> CollectionStore<B> {
    /// Write `defaults` as new records if the collection needs seeding under
    /// the store's [`SeedPolicy`]; otherwise leave it alone.
    ///
    /// The check and the write happen under one lock, so calling this twice
    /// seeds at most once. Seeding an empty `defaults` still writes `[]`,
    /// which marks the collection as initialized.
    pub fn ensure_seeded<M: Model>(
        &self,
        defaults: impl IntoIterator<Item = M>,
    ) -> Result<SeedOutcome<M>, StoreError> {
        let _guard = self.begin("seed")?;
        let mut stored = self.load(M::COLLECTION);

        let needs_seed = match self.seed_policy() {
            SeedPolicy::KeyAbsent => stored.state != StoredState::Present,
            SeedPolicy::Empty => stored.decode::<M>().is_empty(),
        };
        if !needs_seed {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let now = self.now();
        let created = defaults
            .into_iter()
            .map(|data| append(&mut stored, data, now))
            .collect::<Result<Vec<_>, _>>()?;
        self.persist(M::COLLECTION, &stored.docs)?;

        info!("{}: seeded {} default records", M::COLLECTION, created.len());
        Ok(SeedOutcome::Seeded(created))
    }
}
