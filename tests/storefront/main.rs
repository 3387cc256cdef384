//! Integration tests for the storefront cart.

use collection_store::storefront::{self, Cart, Product};
use collection_store::{Backend, CollectionStore, InMemoryBackend};

#[test]
fn storefront_cart_round_trip() {
    let store = CollectionStore::with_config(InMemoryBackend::new(), storefront::store_config());
    let cart = Cart::new(&store);
    let bone = Product {
        id: 7,
        name: "Chew bone".into(),
        price: 4.5,
    };

    cart.add(&bone).unwrap();
    cart.add(&bone).unwrap();
    assert_eq!(cart.count(), 2);
    assert_eq!(cart.total(), 9.0);

    let raw = store.backend().read(storefront::CART_KEY).unwrap();
    assert!(raw.contains("\"productId\":7"));

    let receipt = cart.checkout().unwrap().unwrap();
    assert_eq!(receipt.total, 9.0);
    assert!(cart.is_empty());
}
