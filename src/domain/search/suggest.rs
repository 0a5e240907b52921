//! Search-box suggestions.

use smallvec::SmallVec;

use crate::domain::catalog::models::Product;

/// Maximum number of suggestions offered.
pub const SUGGESTION_LIMIT: usize = 6;

/// Suggestion list, brands first.
pub type Suggestions = SmallVec<[String; SUGGESTION_LIMIT]>;

/// Suggest completions for a partially typed query.
///
/// Matching brands come first (each once, in catalog order), then the names of
/// products whose name contains the query. Brands are not matched against
/// product names or vice versa. Duplicates are dropped and the list is capped
/// at [`SUGGESTION_LIMIT`]. An empty query hides suggestions entirely.
pub fn suggest(products: &[Product], partial: &str) -> Suggestions {
    let mut suggestions = Suggestions::new();

    if partial.is_empty() {
        return suggestions;
    }

    let needle = partial.to_lowercase();

    let brands = products
        .iter()
        .map(|product| product.brand.as_str())
        .filter(|brand| brand.to_lowercase().contains(&needle));

    let names = products
        .iter()
        .map(|product| product.name.as_str())
        .filter(|name| name.to_lowercase().contains(&needle));

    for candidate in brands.chain(names) {
        if suggestions.len() == SUGGESTION_LIMIT {
            break;
        }

        if !suggestions.iter().any(|existing| existing == candidate) {
            suggestions.push(candidate.to_string());
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use crate::test::helpers::named_product;

    use super::*;

    #[test]
    fn empty_query_hides_suggestions() {
        let catalog = vec![named_product("1", "Air Max", "Nike", 100_00)];

        assert!(suggest(&catalog, "").is_empty());
    }

    #[test]
    fn brands_come_before_names() {
        let catalog = vec![
            named_product("1", "Air Max 90", "Nike", 100_00),
            named_product("2", "Ultraboost", "Adidas", 180_00),
            named_product("3", "Nike SB Dunk", "Nike", 110_00),
        ];

        let result = suggest(&catalog, "nik");

        assert_eq!(result.as_slice(), ["Nike", "Nike SB Dunk"]);
    }

    #[test]
    fn product_half_matches_names_only() {
        let catalog = vec![
            named_product("1", "Air Max 90", "Nike", 100_00),
            named_product("2", "Ultraboost", "Adidas", 180_00),
        ];

        let result = suggest(&catalog, "NIKE");

        assert_eq!(result.as_slice(), ["Nike"]);
    }

    #[test]
    fn duplicate_names_appear_once() {
        let catalog = vec![
            named_product("1", "Air Max", "Nike", 100_00),
            named_product("2", "Air Max", "Nike", 120_00),
        ];

        assert_eq!(suggest(&catalog, "air").as_slice(), ["Air Max"]);
    }

    #[test]
    fn capped_at_six() {
        let catalog: Vec<Product> = (1..=9)
            .map(|n| named_product(&n.to_string(), &format!("Runner {n}"), "Acme", 100_00))
            .collect();

        let result = suggest(&catalog, "runner");

        assert_eq!(result.len(), SUGGESTION_LIMIT);
        assert_eq!(result.first().map(String::as_str), Some("Runner 1"));
    }
}
