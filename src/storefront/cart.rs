use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::error::StoreError;
use crate::model::Record;
use crate::store::{Collection, CollectionStore};
use crate::Model;

/// A product as listed in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
}

/// One line of the cart. Adding the same product twice gives two lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase")]
#[model(collection = "cart")]
pub struct CartItem {
    pub product_id: u32,
    pub name: String,
    pub price: f64,
}

/// What was bought at checkout.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub items: Vec<Record<CartItem>>,
    pub total: f64,
}

pub struct Cart<'a, B: Backend> {
    items: Collection<'a, B, CartItem>,
}

impl<'a, B: Backend> Cart<'a, B> {
    pub fn new(store: &'a CollectionStore<B>) -> Self {
        Self {
            items: store.collection(),
        }
    }

    pub fn add(&self, product: &Product) -> Result<Record<CartItem>, StoreError> {
        self.items.create(CartItem {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
        })
    }

    /// Lines in the order they were added.
    pub fn items(&self) -> Vec<Record<CartItem>> {
        self.items.get_all()
    }

    pub fn count(&self) -> usize {
        self.items.count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn total(&self) -> f64 {
        total_of(&self.items())
    }

    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        self.items.delete(id)
    }

    /// Remove the line at `index` as displayed. Out of range is a no-op.
    pub fn remove_at(&self, index: usize) -> Result<bool, StoreError> {
        match self.items().get(index) {
            Some(line) => self.items.delete(&line.id),
            None => Ok(false),
        }
    }

    /// Empty the cart and return what was in it; `None` for an empty cart.
    pub fn checkout(&self) -> Result<Option<Receipt>, StoreError> {
        let items = self.items();
        if items.is_empty() {
            return Ok(None);
        }
        self.items.clear()?;
        let total = total_of(&items);
        Ok(Some(Receipt { items, total }))
    }
}

fn total_of(items: &[Record<CartItem>]) -> f64 {
    items.iter().map(|line| line.price).sum()
}
