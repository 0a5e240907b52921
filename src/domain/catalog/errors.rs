//! Catalog errors.

use thiserror::Error;

use crate::pricing::PriceError;

/// Category name did not match any known category.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    /// Unknown category name.
    #[error("unknown category: {0}")]
    Unknown(String),
}

/// Admin product submission was declined.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// No product name was supplied.
    #[error("product name is required")]
    MissingName,

    /// No (or a zero) price was supplied.
    #[error("product price is required")]
    MissingPrice,
}

/// Seed catalog fixture errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading the fixture file.
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A price string could not be parsed.
    #[error("invalid price for product {0}: {1}")]
    InvalidPrice(String, #[source] PriceError),

    /// A product was listed without images.
    #[error("product {0} has no images")]
    NoImages(String),

    /// A product was listed without sizes.
    #[error("product {0} has no sizes")]
    NoSizes(String),

    /// Two products share an identifier.
    #[error("duplicate product id: {0}")]
    DuplicateId(String),
}
