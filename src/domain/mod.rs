//! Storefront domain: catalog, carts, orders, search and sessions.

pub mod carts;
pub mod catalog;
pub mod orders;
pub mod search;
pub mod sessions;
