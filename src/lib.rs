//! Kicks
//!
//! Kicks is the core of a sneaker storefront: a product catalog, a persisted
//! shopping cart, an order lifecycle and faceted search, plus a generative
//! "design lab" for restyling product photos.
//!
//! [`storefront::Storefront`] ties the pieces together for a single shopper.

pub mod commands;
pub mod config;
pub mod design_lab;
pub mod domain;
pub mod observability;
pub mod pricing;
pub mod render;
pub mod storefront;
pub mod uuids;

#[cfg(test)]
mod test;
