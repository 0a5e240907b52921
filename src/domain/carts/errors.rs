//! Cart storage errors.

use thiserror::Error;

/// Errors from a key-value storage backend.
#[derive(Debug, Error)]
pub enum KeyValueError {
    /// The backing file could not be read or written.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters that cannot be stored.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the store.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Errors from loading or saving the cart.
#[derive(Debug, Error)]
pub enum CartRepositoryError {
    /// The storage backend failed.
    #[error("cart storage error")]
    Storage(#[from] KeyValueError),

    /// The stored cart is malformed.
    #[error("malformed stored cart")]
    Decode(#[source] serde_json::Error),

    /// The cart could not be serialized.
    #[error("failed to serialize cart")]
    Encode(#[source] serde_json::Error),
}
