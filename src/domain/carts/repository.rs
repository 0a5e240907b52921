//! Cart repository.

use mockall::automock;

use crate::domain::carts::{
    errors::CartRepositoryError,
    migration::decode_cart,
    models::CartLineItem,
    storage::KeyValueStore,
};

/// Storage key the cart lives under.
pub const CART_STORAGE_KEY: &str = "kicksai_cart";

/// Durable home of the cart.
#[automock]
pub trait CartRepository: Send + Sync {
    /// Load the saved cart. A missing cart loads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or the saved cart is malformed.
    fn load(&self) -> Result<Vec<CartLineItem>, CartRepositoryError>;

    /// Replace the saved cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded or stored.
    fn save(&self, items: &[CartLineItem]) -> Result<(), CartRepositoryError>;
}

/// Keeps the cart as a JSON array in a [`KeyValueStore`].
#[derive(Debug)]
pub struct StoredCartRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StoredCartRepository<S> {
    /// Store the cart under [`CART_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Store the cart under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> CartRepository for StoredCartRepository<S> {
    fn load(&self) -> Result<Vec<CartLineItem>, CartRepositoryError> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        decode_cart(&json).map_err(CartRepositoryError::Decode)
    }

    fn save(&self, items: &[CartLineItem]) -> Result<(), CartRepositoryError> {
        let json = serde_json::to_string(items).map_err(CartRepositoryError::Encode)?;

        self.store.put(&self.key, &json)?;

        Ok(())
    }
}
