//! Faceted product filtering.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rustc_hash::FxHashSet;

use crate::domain::{
    catalog::models::{Category, Product},
    search::errors::SearchError,
};

/// Category facet: either every category or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,

    /// Only products in this category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether `category` passes this facet.
    pub fn accepts(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => Display::fmt(category, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        Ok(Self::Only(s.parse()?))
    }
}

/// Shop page filter state. The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name or brand. Empty matches all.
    pub query: String,

    /// Accepted brands. Empty accepts every brand.
    pub brands: FxHashSet<String>,

    /// Category facet.
    pub category: CategoryFilter,

    /// Inclusive lower price bound, in minor units.
    pub min_price: Option<u64>,

    /// Inclusive upper price bound, in minor units.
    pub max_price: Option<u64>,
}

impl ProductFilter {
    /// Set the text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Accept `brand` in addition to any brands already selected.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    /// Set the category facet.
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the inclusive price range. `None` leaves a side open.
    #[must_use]
    pub fn with_price_range(mut self, min_price: Option<u64>, max_price: Option<u64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    /// Whether `product` passes every facet.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_query(product)
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
            && self.category.accepts(product.category)
            && product.price >= self.min_price.unwrap_or(0)
            && product.price <= self.max_price.unwrap_or(u64::MAX)
    }

    fn matches_query(&self, product: &Product) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let query = self.query.to_lowercase();

        product.name.to_lowercase().contains(&query) || product.brand.to_lowercase().contains(&query)
    }
}

/// The products passing `filter`, in their original order.
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .collect()
}
