//! Stored cart decoding.
//!
//! Older stored carts carry a single `image` string instead of an `images` list.
//! Decoding upgrades such lines to a one-element list. Lines with neither get an
//! empty list, so consumers of cart lines must not assume a primary image.

use serde::Deserialize;

use crate::domain::{
    carts::models::CartLineItem,
    catalog::models::{Category, Product, ProductId},
};

/// A cart line as found in storage, tolerant of the legacy image field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLineItem {
    id: ProductId,
    name: String,
    brand: String,
    price: u64,

    #[serde(default)]
    original_price: Option<u64>,

    #[serde(default)]
    offer: Option<String>,

    category: Category,

    #[serde(default)]
    images: Option<Vec<String>>,

    /// Legacy single image.
    #[serde(default)]
    image: Option<String>,

    #[serde(default)]
    description: String,

    #[serde(default)]
    sizes: Vec<String>,

    quantity: u32,
    selected_size: String,
}

impl From<StoredLineItem> for CartLineItem {
    fn from(stored: StoredLineItem) -> Self {
        let images = stored
            .images
            .or_else(|| stored.image.map(|image| vec![image]))
            .unwrap_or_default();

        Self {
            product: Product {
                id: stored.id,
                name: stored.name,
                brand: stored.brand,
                price: stored.price,
                original_price: stored.original_price,
                offer: stored.offer,
                category: stored.category,
                images,
                description: stored.description,
                sizes: stored.sizes,
            },
            quantity: stored.quantity.max(1),
            selected_size: stored.selected_size,
        }
    }
}

/// Decode a stored cart, upgrading legacy lines.
///
/// # Errors
///
/// Returns an error if `json` is not a valid stored cart.
pub fn decode_cart(json: &str) -> Result<Vec<CartLineItem>, serde_json::Error> {
    let stored: Vec<StoredLineItem> = serde_json::from_str(json)?;

    Ok(stored.into_iter().map(CartLineItem::from).collect())
}
