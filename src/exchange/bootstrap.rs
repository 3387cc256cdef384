//! First-run setup of the dashboard collections.

use log::info;

use crate::backend::Backend;
use crate::error::StoreError;
use crate::store::CollectionStore;

use super::defaults::{default_balances, default_coins, default_trade_assets, default_users, TEST_EMAIL};
use super::models::{Balance, Coin, TradeAsset, User};

/// How many default records each collection received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// No backend was attached, so nothing was checked or written.
    pub skipped: bool,
    pub coins: usize,
    pub users: usize,
    pub balances: usize,
    pub trade_assets: usize,
}

impl InitReport {
    pub fn total(&self) -> usize {
        self.coins + self.users + self.balances + self.trade_assets
    }
}

/// Seed coins, the test user, the test user's balances and the market table.
///
/// Safe to call on every startup: collections that are already initialized
/// are left alone. Without a backend this does nothing and reports `skipped`.
pub fn initialize_database<B: Backend>(store: &CollectionStore<B>) -> Result<InitReport, StoreError> {
    if !store.is_available() {
        info!("no storage backend attached, skipping database initialization");
        return Ok(InitReport {
            skipped: true,
            ..InitReport::default()
        });
    }

    let mut report = InitReport {
        coins: store.ensure_seeded::<Coin>(default_coins())?.seeded_count(),
        users: store.ensure_seeded::<User>(default_users())?.seeded_count(),
        ..InitReport::default()
    };

    // Balances point at the test user's generated id, so they can only be
    // seeded once that user exists.
    if let Some(user) = store.collection::<User>().find_by_email(TEST_EMAIL) {
        report.balances = store
            .ensure_seeded::<Balance>(default_balances(&user.id))?
            .seeded_count();
    }

    report.trade_assets = store
        .ensure_seeded::<TradeAsset>(default_trade_assets())?
        .seeded_count();

    if report.total() > 0 {
        info!("database initialized with {} default records", report.total());
    }
    Ok(report)
}

/// Drop every known collection and seed again from scratch.
pub fn reset_database<B: Backend>(store: &CollectionStore<B>) -> Result<InitReport, StoreError> {
    store.clear_all()?;
    initialize_database(store)
}
