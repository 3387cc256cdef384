//! Stored collection parsing: raw backend string to JSON objects.

use log::warn;
use serde_json::{Map, Value};

use crate::model::{json_kind, Model, Record, ID_FIELD};

/// What the backend held for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoredState {
    /// Key not present.
    Absent,
    /// A JSON array (possibly empty).
    Present,
    /// Present but not a JSON array. Treated as empty; the raw value stays
    /// in the backend until the next write to the collection replaces it.
    Malformed,
}

/// A collection as read from the backend, one JSON object per record.
///
/// Mutations work on these objects rather than on typed records so fields
/// the current model does not know about survive a rewrite.
#[derive(Debug, Clone)]
pub(crate) struct StoredCollection {
    pub(crate) docs: Vec<Map<String, Value>>,
    pub(crate) state: StoredState,
}

impl StoredCollection {
    pub(crate) fn parse(key: &str, raw: Option<String>) -> Self {
        let raw = match raw {
            Some(raw) => raw,
            None => {
                return Self {
                    docs: Vec::new(),
                    state: StoredState::Absent,
                }
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => {
                let total = items.len();
                let docs: Vec<Map<String, Value>> = items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(map),
                        _ => None,
                    })
                    .collect();
                if docs.len() != total {
                    warn!(
                        "{}: ignoring {} stored entries that are not objects",
                        key,
                        total - docs.len()
                    );
                }
                Self {
                    docs,
                    state: StoredState::Present,
                }
            }
            Ok(other) => {
                warn!(
                    "{}: stored value is {} instead of an array, treating as empty",
                    key,
                    json_kind(&other)
                );
                Self::malformed()
            }
            Err(err) => {
                warn!("{}: stored value is not valid JSON ({}), treating as empty", key, err);
                Self::malformed()
            }
        }
    }

    fn malformed() -> Self {
        Self {
            docs: Vec::new(),
            state: StoredState::Malformed,
        }
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.docs.iter().position(|doc| doc_id(doc) == Some(id))
    }

    pub(crate) fn contains_id(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Decode one object as a record, logging and skipping it on failure.
    pub(crate) fn decode_doc<M: Model>(doc: &Map<String, Value>) -> Option<Record<M>> {
        match Record::<M>::from_document(doc) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    "{}: skipping stored record {:?} that does not decode: {}",
                    M::COLLECTION,
                    doc_id(doc).unwrap_or("<no id>"),
                    err
                );
                None
            }
        }
    }

    pub(crate) fn decode<M: Model>(&self) -> Vec<Record<M>> {
        self.docs.iter().filter_map(Self::decode_doc::<M>).collect()
    }
}

pub(crate) fn doc_id(doc: &Map<String, Value>) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}
