//! Cart Models

use serde::{Deserialize, Serialize};

use crate::{
    domain::catalog::models::{Product, ProductId},
    pricing::line_total,
};

/// A product in the cart in a chosen size.
///
/// The product fields are a snapshot taken when the line was created; later
/// catalog changes do not reach existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Denormalized product snapshot.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity, at least 1.
    pub quantity: u32,

    /// Chosen size, one of the product's sizes when the line was created.
    pub selected_size: String,
}

impl CartLineItem {
    /// Snapshot `product` into a new line with quantity 1.
    pub fn new(product: &Product, size: impl Into<String>) -> Self {
        Self {
            product: product.clone(),
            quantity: 1,
            selected_size: size.into(),
        }
    }

    /// Whether this line holds `product_id` in `size`.
    pub fn matches(&self, product_id: &ProductId, size: &str) -> bool {
        &self.product.id == product_id && self.selected_size == size
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> u64 {
        line_total(self.product.price, self.quantity)
    }
}
