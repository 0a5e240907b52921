//! Admin product intake.
//!
//! The back-office form submits a partially filled product. Blank optional
//! fields fall back to store defaults; name and price are mandatory.

use crate::domain::catalog::{
    errors::IntakeError,
    models::{Category, Product, ProductId},
};

/// Brand used when the form leaves it blank.
pub const DEFAULT_BRAND: &str = "Nike";

/// Category used when the form leaves it blank.
pub const DEFAULT_CATEGORY: Category = Category::Lifestyle;

/// Image used when no image is uploaded.
pub const PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1552346154-21d32810aba3?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80";

/// Description used when the form leaves it blank.
pub const DEFAULT_DESCRIPTION: &str = "New arrival";

/// Sizes used when none are selected.
pub const DEFAULT_SIZES: [&str; 3] = ["40", "41", "42"];

/// Partially filled product record from the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product name (required).
    pub name: Option<String>,

    /// Brand.
    pub brand: Option<String>,

    /// Price in minor units (required, non-zero).
    pub price: Option<u64>,

    /// Pre-discount price in minor units.
    pub original_price: Option<u64>,

    /// Offer badge.
    pub offer: Option<String>,

    /// Category.
    pub category: Option<Category>,

    /// Image references.
    pub images: Vec<String>,

    /// Description.
    pub description: Option<String>,

    /// Selected sizes.
    pub sizes: Vec<String>,
}

impl ProductDraft {
    /// Fill in defaults and assign a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingName`] or [`IntakeError::MissingPrice`] when a
    /// mandatory field is absent.
    pub fn into_product(self) -> Result<Product, IntakeError> {
        let name = non_blank(self.name).ok_or(IntakeError::MissingName)?;
        let price = self
            .price
            .filter(|price| *price > 0)
            .ok_or(IntakeError::MissingPrice)?;

        let images = if self.images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            self.images
        };

        let mut sizes = if self.sizes.is_empty() {
            DEFAULT_SIZES.map(String::from).to_vec()
        } else {
            self.sizes
        };

        sort_sizes(&mut sizes);

        Ok(Product {
            id: ProductId::generate(),
            name,
            brand: non_blank(self.brand).unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            price,
            original_price: self.original_price.filter(|price| *price > 0),
            offer: non_blank(self.offer),
            category: self.category.unwrap_or(DEFAULT_CATEGORY),
            images,
            description: non_blank(self.description)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            sizes,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Sort EU sizes numerically; non-numeric tokens keep their relative order at the end.
fn sort_sizes(sizes: &mut [String]) {
    sizes.sort_by(|a, b| {
        match (a.parse::<f64>().ok(), b.parse::<f64>().ok()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}
