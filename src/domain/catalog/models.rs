//! Catalog Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::errors::CategoryError;

/// Product identifier, unique across the live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Assign a fresh, unique identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Running shoes.
    Running,

    /// Everyday lifestyle sneakers.
    Lifestyle,

    /// Basketball shoes.
    Basketball,

    /// Customs and collaborations.
    Custom,
}

impl Category {
    /// Every category, in facet display order.
    pub const ALL: [Self; 4] = [
        Self::Lifestyle,
        Self::Basketball,
        Self::Running,
        Self::Custom,
    ];

    /// Display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Lifestyle => "Lifestyle",
            Self::Basketball => "Basketball",
            Self::Custom => "Custom",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}

/// Product Model
///
/// Products are never edited in place; the catalog only adds and removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Brand name.
    pub brand: String,

    /// Price in minor units.
    pub price: u64,

    /// Pre-discount price in minor units, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,

    /// Offer badge, e.g. `"10% OFF"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<String>,

    /// Category.
    pub category: Category,

    /// Image references; the first one is the primary image.
    pub images: Vec<String>,

    /// Free-text description.
    pub description: String,

    /// Available EU sizes.
    pub sizes: Vec<String>,
}

impl Product {
    /// The primary image, if the product has any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether `size` is one of the sizes this product is sold in.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|candidate| candidate == size)
    }
}
