//! Criteria matching and projections over fetched records.
//!
//! Everything here is pure: it works on JSON objects or on records already
//! read from the store, and is what `get_by`/`update_by`/`delete_by` use to
//! decide which stored objects match.

use log::error;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{json_kind, Record};

/// Exact-match criteria: every listed field must equal its value.
///
/// Empty criteria match every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    fields: Vec<(String, Value)>,
    never: bool,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`. A later `eq` on the same field
    /// replaces the earlier one.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    /// Criteria from a typed patch: every field the patch sets must match.
    ///
    /// A patch that does not serialize to a JSON object is a programming
    /// error; it is logged and yields criteria that match nothing, so reads
    /// still degrade to empty results.
    pub fn matching<P: Serialize>(patch: &P) -> Self {
        match serde_json::to_value(patch) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .fold(Self::new(), |criteria, (field, value)| criteria.eq(field, value)),
            Ok(other) => {
                error!(
                    "criteria must serialize to an object, got {}",
                    json_kind(&other)
                );
                Self::nothing()
            }
            Err(err) => {
                error!("failed to serialize criteria: {}", err);
                Self::nothing()
            }
        }
    }

    fn nothing() -> Self {
        Self {
            fields: Vec::new(),
            never: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && !self.never
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v))
    }
}

/// True when every criteria field is present in `object` with an equal value.
pub fn matches(object: &Map<String, Value>, criteria: &Criteria) -> bool {
    if criteria.never {
        return false;
    }
    criteria
        .fields
        .iter()
        .all(|(field, expected)| object.get(field).is_some_and(|actual| values_equal(actual, expected)))
}

/// JSON equality where numbers compare by value, so `1` matches `1.0`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

fn record_object<M: Serialize>(record: &Record<M>) -> Option<Map<String, Value>> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Records matching `criteria`, in their original order.
pub fn filter<'a, M: Serialize>(records: &'a [Record<M>], criteria: &Criteria) -> Vec<&'a Record<M>> {
    records
        .iter()
        .filter(|record| record_object(record).is_some_and(|obj| matches(&obj, criteria)))
        .collect()
}

/// First record matching `criteria`.
pub fn first<'a, M: Serialize>(records: &'a [Record<M>], criteria: &Criteria) -> Option<&'a Record<M>> {
    records
        .iter()
        .find(|record| record_object(record).is_some_and(|obj| matches(&obj, criteria)))
}

/// Each record reduced to the named fields it has. Unknown names are skipped.
pub fn project<M: Serialize>(records: &[Record<M>], fields: &[&str]) -> Vec<Map<String, Value>> {
    records
        .iter()
        .filter_map(record_object)
        .map(|obj| {
            fields
                .iter()
                .filter_map(|field| obj.get(*field).map(|v| (field.to_string(), v.clone())))
                .collect()
        })
        .collect()
}

/// Values of one field across records; records without it are skipped.
pub fn pluck<M: Serialize>(records: &[Record<M>], field: &str) -> Vec<Value> {
    records
        .iter()
        .filter_map(record_object)
        .filter_map(|mut obj| obj.remove(field))
        .collect()
}
