//! Catalog store.

use tracing::debug;

use crate::domain::catalog::{
    errors::FixtureError,
    models::{Product, ProductId},
    seed::seed_products,
};

/// Number of products shown on the home page.
pub const FEATURED_LIMIT: usize = 8;

/// Number of related products shown on a product page.
pub const RELATED_LIMIT: usize = 4;

/// The live, ordered list of sellable products (most recent first).
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    /// Create a catalog holding the given products, in order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Create a catalog from the shipped seed fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fixture is invalid.
    pub fn seeded() -> Result<Self, FixtureError> {
        seed_products().map(Self::new)
    }

    /// Insert a product at the front of the catalog.
    ///
    /// The caller assigns a unique id beforehand.
    pub fn add_product(&mut self, product: Product) {
        debug!(product = %product.id, name = %product.name, "adding product to catalog");

        self.products.insert(0, product);
    }

    /// Remove the product with the given id. Removing an unknown id is a no-op.
    pub fn remove_product(&mut self, id: &ProductId) {
        let before = self.products.len();

        self.products.retain(|product| &product.id != id);

        debug!(
            product = %id,
            removed = before != self.products.len(),
            "removing product from catalog"
        );
    }

    /// The current catalog, most recent first.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Distinct brands, in order of first appearance.
    pub fn brands(&self) -> Vec<&str> {
        let mut brands: Vec<&str> = Vec::new();

        for product in &self.products {
            if !brands.contains(&product.brand.as_str()) {
                brands.push(&product.brand);
            }
        }

        brands
    }

    /// Products shown on the home page.
    pub fn featured(&self) -> &[Product] {
        self.products
            .get(..FEATURED_LIMIT)
            .unwrap_or(self.products.as_slice())
    }

    /// Other products in the same category as `product`.
    pub fn related(&self, product: &Product) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|candidate| candidate.category == product.category && candidate.id != product.id)
            .take(RELATED_LIMIT)
            .collect()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
