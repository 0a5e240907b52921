//! Result ordering.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::domain::{catalog::models::Product, search::errors::SearchError};

/// Shop page sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Catalog order, most recent first.
    #[default]
    Newest,

    /// Cheapest first.
    PriceAsc,

    /// Most expensive first.
    PriceDesc,
}

impl SortMode {
    /// Kebab-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Newest, Self::PriceAsc, Self::PriceDesc]
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SearchError::UnknownSortMode(s.to_string()))
    }
}

/// Order `products` by `mode`. Equal prices keep their incoming order.
pub fn sort_products(products: &mut [&Product], mode: SortMode) {
    match mode {
        SortMode::Newest => {}
        SortMode::PriceAsc => products.sort_by_key(|product| product.price),
        SortMode::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}
