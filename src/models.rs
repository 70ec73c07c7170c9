use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{carts, products},
    line_items::LineItem,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    /// Availability flag.
    pub status: bool,
    pub thumbnails: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            code: model.code,
            price: model.price,
            stock: model.stock,
            category: model.category,
            status: model.status,
            thumbnails: model.thumbnails.0,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: Uuid,
    pub products: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

impl From<carts::Model> for Cart {
    fn from(model: carts::Model) -> Self {
        Self {
            id: model.id,
            products: model.products.into_vec(),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// A line item whose product reference has been resolved. `product` is `None`
/// when the referenced product no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExpandedLineItem {
    pub product: Option<Product>,
    pub quantity: i32,
}

impl ExpandedLineItem {
    pub fn subtotal(&self) -> f64 {
        self.product
            .as_ref()
            .map(|p| p.price * f64::from(self.quantity))
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartWithProducts {
    pub id: Uuid,
    pub products: Vec<ExpandedLineItem>,
    pub created_at: DateTime<Utc>,
}

impl CartWithProducts {
    pub fn total(&self) -> f64 {
        self.products.iter().map(ExpandedLineItem::subtotal).sum()
    }
}
