//! Catalog

pub mod errors;
pub mod intake;
pub mod models;
pub mod seed;
pub mod service;

pub use errors::{CategoryError, FixtureError, IntakeError};
pub use service::*;
