//! Integration tests for CollectionStore over the in-memory and file backends.

mod models;

use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use collection_store::{
    query, Backend, CollectionStore, Criteria, FileBackend, InMemoryBackend, Model, StoreError,
    SteppingClock, UnavailableBackend,
};
use models::{Coin, CoinPatch, WatchEntry, WatchEntryPatch};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn store() -> CollectionStore<InMemoryBackend> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    CollectionStore::new(InMemoryBackend::new())
        .with_clock(SteppingClock::new(start, Duration::milliseconds(10)))
}

#[test]
fn usd_create_update_delete_scenario() {
    let store = store();

    let usd = store.create(Coin::new("USD", "US Dollar", 1.0)).unwrap();
    let all = store.get_all::<Coin>();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, usd.id);
    assert_eq!(all[0].created_at, all[0].updated_at);
    assert_eq!(all[0].current_price_usd, 1.0);

    let updated = store
        .update::<Coin>(&usd.id, &CoinPatch::default().current_price_usd(1.01))
        .unwrap()
        .unwrap();
    assert_eq!(updated.current_price_usd, 1.01);
    assert!(updated.updated_at > updated.created_at);

    assert!(store.delete::<Coin>(&usd.id).unwrap());
    assert!(store.get_all::<Coin>().is_empty());
}

#[test]
fn created_ids_are_pairwise_distinct() {
    let store = store();
    let coins = store.collection::<Coin>();

    let mut ids = HashSet::new();
    for i in 0..200 {
        let record = coins.create(Coin::new(&format!("C{}", i), "Coin", 1.0)).unwrap();
        assert!(ids.insert(record.id));
    }
    let batch = coins
        .create_many((0..50).map(|i| Coin::new(&format!("B{}", i), "Batch", 2.0)))
        .unwrap();
    for record in batch {
        assert!(ids.insert(record.id));
    }
    assert_eq!(coins.count(), 250);
}

#[test]
fn create_then_get_round_trips() {
    let store = store();
    let created = store.create(Coin::new("ETH", "Ethereum", 2500.123456789)).unwrap();
    assert_eq!(store.get_by_id::<Coin>(&created.id), Some(created));
}

#[test]
fn update_changes_only_the_given_field() {
    let store = store();
    let btc = store.create(Coin::new("BTC", "Bitcoin", 45000.0)).unwrap();

    let renamed = store
        .update::<Coin>(&btc.id, &CoinPatch::default().name("Bitcoin Core"))
        .unwrap()
        .unwrap();

    assert_eq!(renamed.name, "Bitcoin Core");
    assert_eq!(renamed.symbol, btc.symbol);
    assert_eq!(renamed.current_price_usd, btc.current_price_usd);
    assert_eq!(renamed.id, btc.id);
    assert_eq!(renamed.created_at, btc.created_at);
    assert!(renamed.updated_at > btc.updated_at);
}

#[test]
fn delete_missing_id_leaves_collection_unchanged() {
    let store = store();
    store.create(Coin::new("USD", "US Dollar", 1.0)).unwrap();
    let before = store.backend().read("db_coins");

    assert!(!store.delete::<Coin>("does-not-exist").unwrap());
    assert_eq!(store.backend().read("db_coins"), before);
}

#[test]
fn get_by_is_the_exact_ordered_subset() {
    let store = store();
    store
        .create_many(vec![
            Coin::new("A", "Same", 1.0),
            Coin::new("B", "Other", 1.0),
            Coin::new("C", "Same", 2.0),
            Coin::new("D", "same", 3.0),
        ])
        .unwrap();

    let criteria = Criteria::new().eq("name", "Same");
    let matched = store.get_by::<Coin>(&criteria);
    let symbols: Vec<&str> = matched.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["A", "C"]);

    let all = store.get_all::<Coin>();
    let expected: Vec<_> = query::filter(&all, &criteria).into_iter().cloned().collect();
    assert_eq!(matched, expected);

    let first = store.get_first::<Coin>(&criteria).unwrap();
    assert_eq!(first.symbol, "A");
    assert_eq!(store.get_first::<Coin>(&Criteria::new().eq("name", "None")), None);
}

#[test]
fn typed_handle_finds_with_patches() {
    let store = store();
    let coins = store.collection::<Coin>();
    assert_eq!(coins.name(), "coins");

    coins.create(Coin::new("BTC", "Bitcoin", 45000.0)).unwrap();
    coins.create(Coin::new("ETH", "Ethereum", 2500.0)).unwrap();

    let eth = coins.find_first(&CoinPatch::default().symbol("ETH")).unwrap();
    assert_eq!(eth.name, "Ethereum");
    assert_eq!(coins.find(&CoinPatch::default()).len(), 2);

    let touched = coins
        .update_by(
            &Criteria::matching(&CoinPatch::default().symbol("BTC")),
            &CoinPatch::default().current_price_usd(97000.0),
        )
        .unwrap();
    assert_eq!(touched, 1);
    assert_eq!(coins.get_by(&Criteria::new().eq("currentPriceUsd", 97000)).len(), 1);
}

#[test]
fn derived_defaults_and_renames() {
    assert_eq!(WatchEntry::COLLECTION, "watch_entrys");

    let store = store();
    let entry = store
        .create(WatchEntry {
            symbol: "SOL".into(),
            alert_above: None,
        })
        .unwrap();
    let updated = store
        .update::<WatchEntry>(&entry.id, &WatchEntryPatch::default().alert_above(200.0))
        .unwrap()
        .unwrap();
    assert_eq!(updated.alert_above, Some(200.0));

    let raw = store.backend().read("db_watch_entrys").unwrap();
    assert!(raw.contains("\"alertAbove\":200.0"));
}

#[test]
fn clear_removes_collection_and_clear_all_every_known_one() {
    let store = store();
    store.create(Coin::new("USD", "US Dollar", 1.0)).unwrap();
    store
        .create(WatchEntry {
            symbol: "USD".into(),
            alert_above: None,
        })
        .unwrap();

    store.collection::<Coin>().clear().unwrap();
    assert!(!store.is_populated::<Coin>());
    assert!(store.is_populated::<WatchEntry>());

    store.clear_all().unwrap();
    assert!(store.backend().is_empty());
}

#[test]
fn headless_store_reads_empty_and_refuses_writes() {
    let store = CollectionStore::new(UnavailableBackend);

    assert!(store.get_all::<Coin>().is_empty());
    assert_eq!(store.get_by_id::<Coin>("x"), None);
    assert_eq!(store.count::<Coin>(), 0);

    for result in [
        store.create(Coin::new("USD", "US Dollar", 1.0)).map(|_| ()),
        store.update_by::<Coin>(&Criteria::new(), &CoinPatch::default()).map(|_| ()),
        store.delete_by::<Coin>(&Criteria::new()).map(|_| ()),
        store.clear::<Coin>(),
    ] {
        assert!(matches!(result, Err(StoreError::BackendUnavailable { .. })));
    }
}

#[test]
fn two_contexts_over_one_backend_last_writer_wins() {
    let backend = InMemoryBackend::new();
    let tab_a = CollectionStore::new(backend.clone());
    let tab_b = CollectionStore::new(backend);

    let usd = tab_a.create(Coin::new("USD", "US Dollar", 1.0)).unwrap();
    assert_eq!(tab_b.get_by_id::<Coin>(&usd.id).unwrap().symbol, "USD");

    tab_a
        .update::<Coin>(&usd.id, &CoinPatch::default().current_price_usd(1.5))
        .unwrap();
    tab_b
        .update::<Coin>(&usd.id, &CoinPatch::default().current_price_usd(0.5))
        .unwrap();
    assert_eq!(tab_a.get_by_id::<Coin>(&usd.id).unwrap().current_price_usd, 0.5);
}

#[test]
fn file_backend_persists_across_stores() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let store = CollectionStore::new(FileBackend::new(dir.path()));
        store.create(Coin::new("BTC", "Bitcoin", 45000.0)).unwrap().id
    };

    let reopened = CollectionStore::new(FileBackend::new(dir.path()));
    let btc = reopened.get_by_id::<Coin>(&id).unwrap();
    assert_eq!(btc.name, "Bitcoin");
    assert!(dir.path().join("db_coins.json").exists());
}

#[test]
fn concurrent_creates_on_one_store_are_not_lost() {
    let store = std::sync::Arc::new(CollectionStore::new(InMemoryBackend::new()));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    store
                        .create(Coin::new(&format!("T{}-{}", t, i), "Thread", 1.0))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.count::<Coin>(), 200);
}

#[test]
fn corrupt_stored_value_reads_empty_until_next_write() {
    init_logging();
    let backend = InMemoryBackend::new();
    backend.write("db_coins", "{not json").unwrap();
    let store = CollectionStore::new(backend.clone());

    assert!(store.get_all::<Coin>().is_empty());
    assert_eq!(backend.read("db_coins").as_deref(), Some("{not json"));

    store.create(Coin::new("ETH", "Ethereum", 2500.0)).unwrap();
    let raw = backend.read("db_coins").unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0]["symbol"], "ETH");
}

#[test]
fn non_finite_price_is_rejected_instead_of_stored_unreadable() {
    let store = store();
    let usd = store.create(Coin::new("USD", "US Dollar", 1.0)).unwrap();

    let err = store
        .create(Coin::new("INF", "Infinity", f64::INFINITY))
        .unwrap_err();
    assert!(matches!(err, StoreError::Serde(_)));

    let all = store.get_all::<Coin>();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, usd.id);
    let raw = store.backend().read("db_coins").unwrap();
    assert!(!raw.contains("null"));
}
