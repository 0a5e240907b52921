//! Cart engine.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use tracing::{debug, warn};

use crate::{
    domain::{
        carts::{models::CartLineItem, repository::CartRepository},
        catalog::models::{Product, ProductId},
    },
    pricing::total_price,
};

/// Owns the cart lines and mirrors every change to a [`CartRepository`].
///
/// At most one line exists per (product, size) pair.
pub struct CartEngine {
    items: Vec<CartLineItem>,
    repository: Box<dyn CartRepository>,
}

impl Debug for CartEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartEngine")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartEngine {
    /// Rehydrate the cart from `repository`.
    ///
    /// A cart that cannot be loaded is logged and replaced by an empty one.
    pub fn new(repository: Box<dyn CartRepository>) -> Self {
        let items = match repository.load() {
            Ok(items) => items,
            Err(error) => {
                warn!(%error, "failed to load saved cart, starting with an empty cart");

                Vec::new()
            }
        };

        debug!(lines = items.len(), "cart rehydrated");

        Self { items, repository }
    }

    /// Add one unit of `product` in `size`.
    ///
    /// `size` is expected to be one of `product.sizes`. An existing line for the
    /// same pair has its quantity incremented; otherwise a new line snapshots the
    /// product as it is now.
    pub fn add_to_cart(&mut self, product: &Product, size: &str) -> &[CartLineItem] {
        match self
            .items
            .iter_mut()
            .find(|line| line.matches(&product.id, size))
        {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(CartLineItem::new(product, size)),
        }

        debug!(product = %product.id, size, "added to cart");

        self.persist();

        &self.items
    }

    /// Remove the line for `product_id` in `size`. Unknown lines are ignored.
    pub fn remove_from_cart(&mut self, product_id: &ProductId, size: &str) -> &[CartLineItem] {
        self.items.retain(|line| !line.matches(product_id, size));

        debug!(product = %product_id, size, "removed from cart");

        self.persist();

        &self.items
    }

    /// Change a line's quantity by `delta`, never going below 1.
    ///
    /// Decrementing a single unit leaves it at 1; use
    /// [`remove_from_cart`](Self::remove_from_cart) to drop a line. Unknown lines
    /// are ignored.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        delta: i32,
    ) -> &[CartLineItem] {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches(product_id, size))
        {
            let updated = i64::from(line.quantity)
                .saturating_add(i64::from(delta))
                .max(1);

            line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);

            debug!(product = %product_id, size, quantity = line.quantity, "updated cart quantity");
        }

        self.persist();

        &self.items
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();

        debug!("cart cleared");

        self.persist();
    }

    /// The current lines, in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of price × quantity over all lines.
    pub fn subtotal(&self) -> u64 {
        total_price(self.items.iter().map(|line| (line.product.price, line.quantity)))
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Save failures are logged and never undo the in-memory change.
    fn persist(&self) {
        if let Err(error) = self.repository.save(&self.items) {
            warn!(%error, "failed to save cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{
                errors::{CartRepositoryError, KeyValueError},
                repository::{CART_STORAGE_KEY, MockCartRepository, StoredCartRepository},
                storage::{KeyValueStore, MemoryKeyValueStore},
            },
            catalog::models::Category,
        },
        test::helpers::product,
    };

    use super::*;

    fn empty_repository() -> MockCartRepository {
        let mut repository = MockCartRepository::new();
        repository.expect_load().returning(|| Ok(Vec::new()));
        repository.expect_save().returning(|_| Ok(()));
        repository
    }

    fn engine() -> CartEngine {
        CartEngine::new(Box::new(empty_repository()))
    }

    #[test]
    fn adding_same_pair_twice_increments_quantity() {
        let mut cart = engine();
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "42");
        let items = cart.add_to_cart(&p1, "42");

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|line| line.quantity), Some(2));
        assert_eq!(cart.subtotal(), 200_00);
    }

    #[test]
    fn different_sizes_are_separate_lines() {
        let mut cart = engine();
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "40");
        cart.add_to_cart(&p1, "42");
        cart.add_to_cart(&p1, "40");

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn lines_snapshot_the_product() {
        let mut cart = engine();
        let mut p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "42");
        p1.price = 1;
        p1.name = "Renamed".to_string();

        let line = cart.items().first().map(|line| (line.product.price, line.product.name.clone()));

        assert_eq!(line, Some((100_00, "Sneaker 1".to_string())));
    }

    #[test]
    fn remove_from_cart_drops_only_that_pair() {
        let mut cart = engine();
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "40");
        cart.add_to_cart(&p1, "42");

        let items = cart.remove_from_cart(&p1.id, "42");

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|line| line.selected_size.as_str()), Some("40"));
    }

    #[test]
    fn remove_unknown_line_is_a_noop() {
        let mut cart = engine();
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "40");
        cart.remove_from_cart(&p1.id, "45");
        cart.remove_from_cart(&ProductId::new("nope"), "40");

        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn update_quantity_floors_at_one() {
        let mut cart = engine();
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "42");
        cart.update_quantity(&p1.id, "42", -1);

        assert_eq!(cart.items().first().map(|line| line.quantity), Some(1));

        cart.update_quantity(&p1.id, "42", 4);
        cart.update_quantity(&p1.id, "42", -10);

        assert_eq!(cart.items().first().map(|line| line.quantity), Some(1));
    }

    #[test]
    fn update_quantity_applies_delta() {
        let mut cart = engine();
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "42");
        cart.update_quantity(&p1.id, "42", 2);
        cart.update_quantity(&p1.id, "42", -1);

        assert_eq!(cart.items().first().map(|line| line.quantity), Some(2));
    }

    #[test]
    fn update_unknown_line_is_a_noop() {
        let mut cart = engine();

        let items = cart.update_quantity(&ProductId::new("nope"), "42", 3);

        assert!(items.is_empty());
    }

    #[test]
    fn every_mutation_saves_the_cart() {
        let mut repository = MockCartRepository::new();
        repository.expect_load().returning(|| Ok(Vec::new()));
        repository.expect_save().times(5).returning(|_| Ok(()));

        let mut cart = CartEngine::new(Box::new(repository));
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "42");
        cart.add_to_cart(&p1, "42");
        cart.update_quantity(&p1.id, "42", -1);
        cart.remove_from_cart(&p1.id, "42");
        cart.clear();
    }

    #[test]
    fn save_failure_does_not_block_mutation() {
        let mut repository = MockCartRepository::new();
        repository.expect_load().returning(|| Ok(Vec::new()));
        repository
            .expect_save()
            .returning(|_| Err(CartRepositoryError::Storage(KeyValueError::Poisoned)));

        let mut cart = CartEngine::new(Box::new(repository));
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "42");

        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn malformed_saved_cart_starts_empty() {
        let store = MemoryKeyValueStore::with_entry(CART_STORAGE_KEY, "definitely not json");

        let cart = CartEngine::new(Box::new(StoredCartRepository::new(store)));

        assert!(cart.is_empty());
    }

    #[test]
    fn saved_cart_is_rehydrated() -> TestResult {
        let store = MemoryKeyValueStore::new();
        let repository = StoredCartRepository::new(store);
        let line = CartLineItem::new(&product("1", "Nike", 100_00, Category::Running), "42");

        repository.save(std::slice::from_ref(&line))?;

        let json = repository.store().get(CART_STORAGE_KEY)?.ok_or("cart not saved")?;
        let cart = CartEngine::new(Box::new(StoredCartRepository::new(
            MemoryKeyValueStore::with_entry(CART_STORAGE_KEY, &json),
        )));

        assert_eq!(cart.items(), &[line]);

        Ok(())
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = engine();

        cart.add_to_cart(&product("1", "Nike", 100_00, Category::Running), "42");
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0);
    }
}
