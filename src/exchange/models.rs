//! Record kinds of the exchange dashboard.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Model;

/// A dashboard account. The password is stored and compared in plain text;
/// this is demo data, not authentication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[model(collection = "users")]
pub struct User {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase")]
#[model(collection = "coins")]
pub struct Coin {
    pub symbol: String,
    pub name: String,
    pub current_price_usd: f64,
}

/// Holding of one coin by one user. `user_id` is a user record id and
/// `coin_symbol` a coin's symbol; neither reference is checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase")]
#[model(collection = "balances")]
pub struct Balance {
    pub user_id: String,
    pub coin_symbol: String,
    pub amount: f64,
}

/// A row of the trade screen's market table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase")]
#[model(collection = "trade_assets")]
pub struct TradeAsset {
    pub slug: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub icon_url: String,
    pub market_price: f64,
    #[serde(default)]
    pub trades: u64,
    pub market_cap: String,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
    PriceAlert,
    Transaction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase")]
#[model(collection = "notifications")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Notification {
    /// An unread notification with no icon, link or metadata.
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            icon: None,
            action_url: None,
            metadata: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
