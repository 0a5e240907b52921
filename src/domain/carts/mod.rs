//! Carts

pub mod errors;
pub mod migration;
pub mod models;
pub mod repository;
pub mod service;
pub mod storage;

pub use errors::{CartRepositoryError, KeyValueError};
pub use repository::{CART_STORAGE_KEY, CartRepository, StoredCartRepository};
pub use service::*;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
