// Lets `#[derive(Model)]` output refer to `collection_store::...` from inside this crate too.
extern crate self as collection_store;

pub mod backend;
mod config;
mod error;
pub mod exchange;
mod model;
pub mod query;
mod seed;
mod store;
pub mod storefront;

pub use backend::{default_backend, Backend, BackendError, FileBackend, InMemoryBackend, UnavailableBackend};
#[cfg(feature = "web")]
pub use backend::LocalStorageBackend;
pub use config::{SeedPolicy, StoreConfig, DEFAULT_KEY_PREFIX};
pub use error::StoreError;
pub use model::{
    Clock, Model, Record, SteppingClock, SystemClock, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD,
};
pub use query::Criteria;
pub use seed::SeedOutcome;
pub use store::{Collection, CollectionStore, KeyMap};

// Re-export the derive macro under the trait's name
pub use collection_store_macros::Model;
