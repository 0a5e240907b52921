//! Search errors.

use thiserror::Error;

use crate::domain::catalog::CategoryError;

/// A filter or sort option could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Category selector was neither "All" nor a known category.
    #[error(transparent)]
    Category(#[from] CategoryError),

    /// Unknown sort mode.
    #[error("unknown sort mode: {0} (expected newest, price-asc or price-desc)")]
    UnknownSortMode(String),
}
