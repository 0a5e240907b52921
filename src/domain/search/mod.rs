//! Search
//!
//! Read-only views over the catalog: faceted filtering, price sorting and
//! search-box suggestions. Nothing here mutates the catalog.

pub mod errors;
pub mod filter;
pub mod sort;
pub mod suggest;

pub use errors::SearchError;
pub use filter::{CategoryFilter, ProductFilter, filter_products};
pub use sort::{SortMode, sort_products};
pub use suggest::{SUGGESTION_LIMIT, Suggestions, suggest};
