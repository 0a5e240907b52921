//! Orders

pub mod errors;
pub mod models;
pub mod notifier;
pub mod service;

pub use errors::OrdersError;
pub use notifier::{Notifier, StatusNotification, TracingNotifier};
pub use service::*;
