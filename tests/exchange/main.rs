//! Integration tests for the exchange dashboard data layer.


use collection_store::exchange::{
    self, defaults, initialize_database, login, reset_database, Balance, Coin, CoinPatch,
    LoginError, TradeAsset, User,
};
use collection_store::{Backend, CollectionStore, InMemoryBackend, UnavailableBackend};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dashboard() -> CollectionStore<InMemoryBackend> {
    let store = CollectionStore::with_config(InMemoryBackend::new(), exchange::store_config());
    initialize_database(&store).unwrap();
    store
}

#[test]
fn initialize_seeds_every_collection_once() {
    let store = CollectionStore::with_config(InMemoryBackend::new(), exchange::store_config());

    let first = initialize_database(&store).unwrap();
    assert!(!first.skipped);
    assert_eq!(first.coins, 3);
    assert_eq!(first.users, 1);
    assert_eq!(first.balances, 3);
    assert_eq!(first.trade_assets, 8);

    let second = initialize_database(&store).unwrap();
    assert_eq!(second.total(), 0);
    assert_eq!(store.count::<Coin>(), 3);
    assert_eq!(store.count::<User>(), 1);
}

#[test]
fn initialize_without_backend_is_skipped() {
    let store = CollectionStore::with_config(UnavailableBackend, exchange::store_config());
    let report = initialize_database(&store).unwrap();
    assert!(report.skipped);
    assert_eq!(report.total(), 0);
}

#[test]
fn seeded_balances_belong_to_the_test_user() {
    let store = dashboard();
    let user = store
        .collection::<User>()
        .find_by_email(defaults::TEST_EMAIL)
        .unwrap();

    let balances = store.collection::<Balance>().for_user(&user.id);
    assert_eq!(balances.len(), 3);
    let usd = store
        .collection::<Balance>()
        .for_user_and_coin(&user.id, "USD")
        .unwrap();
    assert_eq!(usd.amount, 9826.87);
}

#[test]
fn market_table_and_notifications_use_their_fixed_keys() {
    let store = dashboard();
    assert!(store.backend().read(exchange::TRADE_DATA_KEY).is_some());
    assert!(store.backend().read("db_coins").is_some());
    assert!(store.backend().read("db_trade_assets").is_none());
}

#[test]
fn login_returns_profile_and_priced_balances() {
    let store = dashboard();

    let summary = login(&store, "TEST@coinbase.com", defaults::TEST_PASSWORD).unwrap();
    assert_eq!(summary.user.email, defaults::TEST_EMAIL);
    assert_eq!(summary.balances.len(), 3);

    let btc = summary.balances.iter().find(|b| b.coin == "BTC").unwrap();
    assert_eq!(btc.coin_name, "Bitcoin");
    assert_eq!(btc.price_usd, 45000.0);
    assert!((btc.value_usd() - 617.4).abs() < 1e-6);
    assert!(summary.total_usd() > 10_000.0);

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["user"].get("password").is_none());
    assert!(json["user"].get("createdAt").is_some());
    assert_eq!(json["balances"][0]["coinName"], "US Dollar");
}

#[test]
fn login_rejects_bad_credentials() {
    let store = dashboard();

    assert_eq!(
        login(&store, "", "password123").unwrap_err(),
        LoginError::MissingCredentials
    );
    assert_eq!(
        login(&store, defaults::TEST_EMAIL, "").unwrap_err(),
        LoginError::MissingCredentials
    );
    assert_eq!(
        login(&store, defaults::TEST_EMAIL, "wrong").unwrap_err(),
        LoginError::InvalidCredentials
    );
    assert_eq!(
        login(&store, "nobody@example.com", "password123").unwrap_err(),
        LoginError::InvalidCredentials
    );
}

#[test]
fn login_reflects_price_updates_and_skips_unknown_coins() {
    init_logging();
    let store = dashboard();
    let coins = store.collection::<Coin>();
    coins
        .update_by_symbol("BTC", &CoinPatch::default().current_price_usd(97000.0))
        .unwrap()
        .unwrap();
    assert_eq!(
        coins.update_by_symbol("XYZ", &CoinPatch::default().current_price_usd(1.0)).unwrap(),
        None
    );

    let user = store
        .collection::<User>()
        .find_by_email(defaults::TEST_EMAIL)
        .unwrap();
    store
        .collection::<Balance>()
        .set_amount(&user.id, "XYZ", 5.0)
        .unwrap();

    let summary = login(&store, defaults::TEST_EMAIL, defaults::TEST_PASSWORD).unwrap();
    assert_eq!(summary.balances.len(), 3);
    let btc = summary.balances.iter().find(|b| b.coin == "BTC").unwrap();
    assert_eq!(btc.price_usd, 97000.0);
}

#[test]
fn set_amount_updates_or_creates() {
    let store = dashboard();
    let balances = store.collection::<Balance>();
    let user = store
        .collection::<User>()
        .find_by_email(defaults::TEST_EMAIL)
        .unwrap();

    let eth = balances.set_amount(&user.id, "ETH", 1.0).unwrap();
    assert_eq!(eth.amount, 1.0);
    assert_eq!(balances.for_user(&user.id).len(), 3);

    balances.set_amount(&user.id, "SOL", 25.0).unwrap();
    assert_eq!(balances.for_user(&user.id).len(), 4);

    assert_eq!(balances.delete_for_user(&user.id).unwrap(), 4);
    assert!(balances.for_user(&user.id).is_empty());
}

#[test]
fn trade_assets_favorites_and_movers() {
    let store = dashboard();
    let assets = store.collection::<TradeAsset>();

    let sol = assets.find_by_slug("solana").unwrap();
    assert_eq!(sol.symbol, "SOL");
    assert!(assets.favorites().is_empty());

    let starred = assets.toggle_favorite(&sol.id).unwrap().unwrap();
    assert!(starred.is_favorite);
    assert_eq!(assets.favorites().len(), 1);

    let unstarred = assets.toggle_favorite(&sol.id).unwrap().unwrap();
    assert!(!unstarred.is_favorite);
    assert_eq!(assets.toggle_favorite("missing").unwrap(), None);

    let movers = assets.top_movers();
    assert_eq!(movers.first().unwrap().slug, "reppo");
    assert_eq!(movers.last().unwrap().slug, "horizen");
}

#[test]
fn reset_restores_defaults() {
    let store = dashboard();
    let coins = store.collection::<Coin>();
    let btc = coins.find_by_symbol("BTC").unwrap();
    coins.delete(&btc.id).unwrap();
    assert_eq!(coins.count(), 2);

    let report = reset_database(&store).unwrap();
    assert_eq!(report.coins, 3);
    assert_eq!(coins.count(), 3);
    assert_eq!(store.count::<User>(), 1);
}

#[test]
fn deleted_coins_are_not_reseeded_on_restart() {
    let backend = InMemoryBackend::new();
    let store = CollectionStore::with_config(backend.clone(), exchange::store_config());
    initialize_database(&store).unwrap();
    store.collection::<Coin>().clear().unwrap();
    backend.write("db_coins", "[]").unwrap();

    let restarted = CollectionStore::with_config(backend, exchange::store_config());
    let report = initialize_database(&restarted).unwrap();
    assert_eq!(report.coins, 0);
    assert!(restarted.get_all::<Coin>().is_empty());
}
