//! Seed catalog fixtures.

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::{
    domain::catalog::{
        errors::FixtureError,
        models::{Category, Product, ProductId},
    },
    pricing::parse_price,
};

/// Catalog shipped with the store.
const SEED_CATALOG: &str = include_str!("../../../fixtures/catalog.yml");

/// Wrapper for products in YAML.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: String,
    name: String,
    brand: String,

    /// e.g. `"180.00 USD"`
    price: String,

    #[serde(default)]
    original_price: Option<String>,

    #[serde(default)]
    offer: Option<String>,

    category: Category,
    images: Vec<String>,
    description: String,
    sizes: Vec<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)
            .map_err(|error| FixtureError::InvalidPrice(fixture.id.clone(), error))?;

        let original_price = fixture
            .original_price
            .as_deref()
            .map(parse_price)
            .transpose()
            .map_err(|error| FixtureError::InvalidPrice(fixture.id.clone(), error))?;

        if fixture.images.is_empty() {
            return Err(FixtureError::NoImages(fixture.id));
        }

        if fixture.sizes.is_empty() {
            return Err(FixtureError::NoSizes(fixture.id));
        }

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            brand: fixture.brand,
            price,
            original_price,
            offer: fixture.offer,
            category: fixture.category,
            images: fixture.images,
            description: fixture.description,
            sizes: fixture.sizes,
        })
    }
}

/// Parse a catalog fixture from YAML source.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a price is invalid, a product has no
/// images or sizes, or two products share an id.
pub fn parse_catalog_fixture(source: &str) -> Result<Vec<Product>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(source)?;
    let mut seen = FxHashSet::default();

    fixture
        .products
        .into_iter()
        .map(|product_fixture| {
            if !seen.insert(product_fixture.id.clone()) {
                return Err(FixtureError::DuplicateId(product_fixture.id));
            }

            Product::try_from(product_fixture)
        })
        .collect()
}

/// Load a catalog fixture from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails [`parse_catalog_fixture`].
pub fn load_catalog_fixture(path: impl AsRef<Path>) -> Result<Vec<Product>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog_fixture(&contents)
}

/// The catalog shipped with the store.
///
/// # Errors
///
/// Returns an error if the embedded fixture is invalid.
pub fn seed_products() -> Result<Vec<Product>, FixtureError> {
    parse_catalog_fixture(SEED_CATALOG)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn seed_catalog_loads_eight_products_in_order() -> TestResult {
        let products = seed_products()?;

        let ids: Vec<&str> = products.iter().map(|product| product.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);

        Ok(())
    }

    #[test]
    fn seed_catalog_parses_prices_and_offers() -> TestResult {
        let products = seed_products()?;
        let jordan = products.first().ok_or("empty seed catalog")?;

        assert_eq!(jordan.price, 180_00);
        assert_eq!(jordan.original_price, Some(200_00));
        assert_eq!(jordan.offer.as_deref(), Some("10% OFF"));
        assert_eq!(jordan.images.len(), 3);

        Ok(())
    }

    #[test]
    fn seed_products_all_have_images_and_sizes() -> TestResult {
        for product in seed_products()? {
            assert!(product.primary_image().is_some(), "{} has no image", product.id);
            assert!(!product.sizes.is_empty(), "{} has no sizes", product.id);
        }

        Ok(())
    }

    #[test]
    fn product_without_images_is_rejected() {
        let yaml = r#"
products:
  - id: "x"
    name: Blank
    brand: Nike
    price: 10 USD
    category: Running
    images: []
    description: none
    sizes: ["42"]
"#;

        let result = parse_catalog_fixture(yaml);

        assert!(
            matches!(result, Err(FixtureError::NoImages(ref id)) if id == "x"),
            "expected NoImages, got {result:?}"
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"
products:
  - { id: "1", name: A, brand: B, price: 1 USD, category: Custom, images: [a], description: d, sizes: ["40"] }
  - { id: "1", name: C, brand: D, price: 2 USD, category: Custom, images: [c], description: d, sizes: ["40"] }
"#;

        let result = parse_catalog_fixture(yaml);

        assert!(
            matches!(result, Err(FixtureError::DuplicateId(ref id)) if id == "1"),
            "expected DuplicateId, got {result:?}"
        );
    }

    #[test]
    fn invalid_price_names_the_product() {
        let yaml = r#"
products:
  - { id: "9", name: A, brand: B, price: free, category: Custom, images: [a], description: d, sizes: ["40"] }
"#;

        let result = parse_catalog_fixture(yaml);

        assert!(
            matches!(result, Err(FixtureError::InvalidPrice(ref id, _)) if id == "9"),
            "expected InvalidPrice, got {result:?}"
        );
    }

    #[test]
    fn load_catalog_fixture_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(SEED_CATALOG.as_bytes())?;

        let products = load_catalog_fixture(file.path())?;

        assert_eq!(products.len(), 8);

        Ok(())
    }
}
