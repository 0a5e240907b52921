//! Order errors.

use thiserror::Error;

use crate::domain::orders::models::OrderStatus;

/// Order lifecycle errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrdersError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cannot place an order from an empty cart")]
    EmptyCart,

    /// The requested status change is not a single forward step.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
}
