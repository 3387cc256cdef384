//! Models used by the store integration tests.

use collection_store::Model;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase")]
#[model(collection = "coins")]
pub struct Coin {
    pub symbol: String,
    pub name: String,
    pub current_price_usd: f64,
}

impl Coin {
    pub fn new(symbol: &str, name: &str, price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price_usd: price,
        }
    }
}

/// No explicit collection: defaults to "watch_entrys".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
pub struct WatchEntry {
    pub symbol: String,
    #[serde(rename = "alertAbove")]
    pub alert_above: Option<f64>,
}
