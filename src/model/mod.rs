//! Models - typed record kinds stored in named collections.
//!
//! A model is the caller-owned part of a record: the fields that describe a
//! coin, a balance, a cart line. The store wraps it in a [`Record`] that adds
//! the id and timestamps it manages itself.
//!
//! ## Example
//!
//! ```ignore
//! use collection_store::{CollectionStore, InMemoryBackend, Model};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize, Model)]
//! #[serde(rename_all = "camelCase")]
//! #[model(collection = "coins")]
//! struct Coin {
//!     symbol: String,
//!     name: String,
//!     current_price_usd: f64,
//! }
//!
//! let store = CollectionStore::new(InMemoryBackend::new());
//! let usd = store.create(Coin { symbol: "USD".into(), name: "US Dollar".into(), current_price_usd: 1.0 })?;
//! store.update::<Coin>(&usd.id, &CoinPatch::default().current_price_usd(1.01))?;
//! ```

mod clock;
mod id;

use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

pub use clock::{Clock, SteppingClock, SystemClock};
pub(crate) use id::generate_id;

/// Field holding a record's id in its stored object.
pub const ID_FIELD: &str = "id";
/// Field holding a record's creation time in its stored object.
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Field holding a record's last mutation time in its stored object.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Fields managed by the store. Change sets never overwrite them.
pub(crate) const RESERVED_FIELDS: [&str; 3] = [ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD];

/// Trait for types that can be stored as records.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Logical collection name (e.g. "users", "coins"). The storage key is
    /// derived from it by the store's [`KeyMap`](crate::KeyMap).
    const COLLECTION: &'static str;

    /// Typed change set used by `update`/`update_by` and as match criteria.
    /// Must serialize to a JSON object holding only the fields being set.
    type Patch: Serialize + Default;
}

/// A stored model together with the fields the store manages.
///
/// Serialized as one flat JSON object: `id`, `createdAt`, `updatedAt` next to
/// the model's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<M> {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: M,
}

impl<M> Record<M> {
    pub fn data(&self) -> &M {
        &self.data
    }

    pub fn into_data(self) -> M {
        self.data
    }
}

impl<M> Deref for Record<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.data
    }
}

impl<M: Model> Record<M> {
    pub(crate) fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "{} record serialized to {} instead of an object",
                M::COLLECTION,
                json_kind(&other)
            ))),
        }
    }

    pub(crate) fn from_document(doc: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(doc.clone()))
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
