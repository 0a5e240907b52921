//! Sessions

pub mod models;
pub mod service;

pub use models::{Role, User};
pub use service::*;
