//! Cart line items and the single place where they are merged.
//!
//! Every cart mutation (add, quantity update, removal, bulk replace, clear)
//! goes through [`LineItems`], which keeps at most one entry per product.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub product: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Ordered list of line items stored as one JSONB document on the cart row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct LineItems(Vec<LineItem>);

impl LineItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from arbitrary items, folding duplicates into the first occurrence.
    pub fn merged(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut merged = Self::new();
        for item in items {
            match merged.find_mut(item.product) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
                None => merged.0.push(item),
            }
        }
        merged
    }

    /// Increments the product's quantity by one, appending it when absent.
    /// Returns the resulting quantity.
    pub fn add(&mut self, product: Uuid) -> i32 {
        match self.find_mut(product) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                item.quantity
            }
            None => {
                self.0.push(LineItem {
                    product,
                    quantity: 1,
                });
                1
            }
        }
    }

    /// Overwrites the quantity of an existing line item. Returns `false` if the
    /// product is not in the list.
    pub fn set_quantity(&mut self, product: Uuid, quantity: i32) -> bool {
        match self.find_mut(product) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if nothing matched.
    pub fn remove(&mut self, product: Uuid) -> bool {
        let before = self.0.len();
        self.0.retain(|item| item.product != product);
        self.0.len() != before
    }

    pub fn replace_all(&mut self, items: impl IntoIterator<Item = LineItem>) {
        *self = Self::merged(items);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn quantity_of(&self, product: Uuid) -> Option<i32> {
        self.0
            .iter()
            .find(|item| item.product == product)
            .map(|item| item.quantity)
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        self.0.iter().map(|item| item.product).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<LineItem> {
        self.0
    }

    fn find_mut(&mut self, product: Uuid) -> Option<&mut LineItem> {
        self.0.iter_mut().find(|item| item.product == product)
    }
}
