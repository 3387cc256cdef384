//! Data layer of the crypto exchange dashboard.
//!
//! Five collections: users, coins, balances, the trade screen's market
//! table and the notification feed. Collection-specific lookups are added
//! to the typed [`Collection`](crate::Collection) handle:
//!
//! ```ignore
//! let store = CollectionStore::with_config(backend, exchange::store_config());
//! exchange::initialize_database(&store)?;
//!
//! let btc = store.collection::<Coin>().find_by_symbol("BTC");
//! let summary = exchange::login(&store, "test@coinbase.com", "password123")?;
//! ```

mod accounts;
mod bootstrap;
pub mod defaults;
mod models;
mod notifications;
mod trade;

use crate::config::StoreConfig;
use crate::Model;

pub use accounts::{login, BalanceLine, LoginError, LoginSummary, UserProfile};
pub use bootstrap::{initialize_database, reset_database, InitReport};
pub use models::{
    Balance, BalancePatch, Coin, CoinPatch, Notification, NotificationKind, NotificationPatch,
    TradeAsset, TradeAssetPatch, User, UserPatch,
};

/// Storage key of the market table.
pub const TRADE_DATA_KEY: &str = "coinbase_trade_data";
/// Storage key of the notification feed.
pub const NOTIFICATIONS_KEY: &str = "coinbase_notifications";

/// Configuration registering every dashboard collection, with the market
/// table and notification feed under their fixed keys.
pub fn store_config() -> StoreConfig {
    StoreConfig::default()
        .with_collection(User::COLLECTION)
        .with_collection(Coin::COLLECTION)
        .with_collection(Balance::COLLECTION)
        .with_collection(TradeAsset::COLLECTION)
        .with_collection(Notification::COLLECTION)
        .with_key(TradeAsset::COLLECTION, TRADE_DATA_KEY)
        .with_key(Notification::COLLECTION, NOTIFICATIONS_KEY)
}
