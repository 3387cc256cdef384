//! Data layer of the pet-store storefront: a shopping cart kept in the
//! `cart` key of browser storage.

mod cart;

use crate::config::StoreConfig;
use crate::Model;

pub use cart::{Cart, CartItem, CartItemPatch, Product, Receipt};

/// Storage key of the cart.
pub const CART_KEY: &str = "cart";

pub fn store_config() -> StoreConfig {
    StoreConfig::default()
        .with_collection(CartItem::COLLECTION)
        .with_key(CartItem::COLLECTION, CART_KEY)
}
