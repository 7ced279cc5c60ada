//! # Catalog Filter
//!
//! The product listing shows the catalog narrowed by two inputs: the
//! category bar and the search box in the header.
//!
//! ## Filter Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product included  ⇔  category matches  AND  search matches             │
//! │                                                                         │
//! │  category matches:  selector == "all"  OR  product.category == selector │
//! │  search matches:    query == ""                                         │
//! │                     OR lower(name)  contains lower(query)               │
//! │                     OR lower(brand) contains lower(query)               │
//! │                                                                         │
//! │  Stable: results keep catalog order. Total: never fails.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The query is used as typed (no trimming), so a lone space only matches
//! names or brands containing a space.


use crate::types::{Category, Product};
use crate::ALL_CATEGORIES;

// =============================================================================
// Query Types
// =============================================================================

/// Category selector from the category bar.
///
/// Built from the raw selector string with [`CategoryFilter::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only products of this category.
    Only(Category),
    /// A selector naming no known category: nothing can match it.
    Unknown,
}

impl CategoryFilter {
    /// Interprets a raw selector value ("all" or a category slug).
    pub fn parse(selector: &str) -> Self {
        if selector == ALL_CATEGORIES {
            return CategoryFilter::All;
        }
        selector
            .parse::<Category>()
            .map(CategoryFilter::Only)
            .unwrap_or(CategoryFilter::Unknown)
    }

    #[inline]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
            CategoryFilter::Unknown => false,
        }
    }
}

/// The two listing inputs together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    category: CategoryFilter,
    /// Lowercased once up front; matching lowercases only the product side.
    needle: String,
    search: String,
}

impl CatalogQuery {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        let search = search.into();
        CatalogQuery {
            category,
            needle: search.to_lowercase(),
            search,
        }
    }

    /// Builds a query from the raw selector and search box values.
    pub fn from_raw(category: &str, search: &str) -> Self {
        CatalogQuery::new(CategoryFilter::parse(category), search)
    }

    #[inline]
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// The search text as the shopper typed it.
    #[inline]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// True when the search box has text (the listing then shows a
    /// result-count line).
    #[inline]
    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product) && self.matches_search(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(&self.needle)
            || product.brand.to_lowercase().contains(&self.needle)
    }

    /// Lazily yields matching products in catalog order.
    pub fn apply<'q, 'p: 'q>(
        &'q self,
        products: &'p [Product],
    ) -> impl Iterator<Item = &'p Product> + 'q {
        products.iter().filter(move |p| self.matches(p))
    }
}

/// Filters `products` by a raw category selector and search string.
///
/// ```rust
/// use pedal_core::catalog::filter;
/// use pedal_core::types::{Category, Product};
/// use pedal_core::Money;
///
/// let products = vec![
///     Product::new("1", "Fixie A", Money::from_units(1_000_000), Category::Fixie, "Brand1"),
///     Product::new("2", "Velg B", Money::from_units(500_000), Category::Velg, "Brand2"),
/// ];
///
/// assert_eq!(filter(&products, "all", "").len(), 2);
/// assert_eq!(filter(&products, "velg", "").len(), 1);
/// assert_eq!(filter(&products, "all", "FIXIE")[0].id, "1");
/// ```
pub fn filter<'a>(products: &'a [Product], category: &str, search: &str) -> Vec<&'a Product> {
    let query = CatalogQuery::from_raw(category, search);
    query.apply(products).collect()
}

// =============================================================================
// Catalog
// =============================================================================

/// The full product list for a session, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products flagged for the landing page, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    pub fn filter(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(&self.products).collect()
    }
}

/// Line shown above the grid while searching, e.g.
/// `Showing 3 results for "fixie"`. `None` when the search box is empty.
pub fn result_summary(query: &CatalogQuery, count: usize) -> Option<String> {
    if !query.is_searching() {
        return None;
    }
    Some(format!("Showing {} results for \"{}\"", count, query.search()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use proptest::prelude::*;

    fn sample() -> Vec<Product> {
        vec![
            Product::new("1", "Fixie A", Money::from_units(1_000_000), Category::Fixie, "Brand1"),
            Product::new("2", "Velg B", Money::from_units(500_000), Category::Velg, "Brand2"),
            Product::new("3", "Ban Slick 700x23", Money::from_units(95_000), Category::Ban, "Kenda"),
            Product::new("4", "Ban Gumwall", Money::from_units(120_000), Category::Ban, "FixieCo")
                .mark_featured(),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_all_and_empty_returns_full_catalog_in_order() {
        let products = sample();
        assert_eq!(ids(&filter(&products, "all", "")), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_category_only() {
        let products = sample();
        let result = filter(&products, "ban", "");
        assert_eq!(ids(&result), vec!["3", "4"]);
        assert!(result.iter().all(|p| p.category == Category::Ban));
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_brand() {
        let products = sample();
        // "Fixie A" by name, "Ban Gumwall" by brand "FixieCo"
        assert_eq!(ids(&filter(&products, "all", "FIXIE")), vec!["1", "4"]);
        assert_eq!(ids(&filter(&products, "all", "kenda")), vec!["3"]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let products = sample();
        assert_eq!(ids(&filter(&products, "ban", "fixie")), vec!["4"]);
        assert!(filter(&products, "velg", "fixie").is_empty());
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let products = sample();
        assert!(filter(&products, "bmx", "").is_empty());
        assert_eq!(CategoryFilter::parse("bmx"), CategoryFilter::Unknown);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(filter(&[], "all", "anything").is_empty());
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let products = sample();
        // Every sample name contains a space
        assert_eq!(filter(&products, "all", " ").len(), 4);
        assert!(filter(&products, "all", " fixie ").is_empty());
    }

    #[test]
    fn test_catalog_lookup_and_featured() {
        let catalog = Catalog::new(sample());
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("2").map(|p| p.name.as_str()), Some("Velg B"));
        assert!(catalog.get("99").is_none());

        let featured: Vec<&str> = catalog.featured().map(|p| p.id.as_str()).collect();
        assert_eq!(featured, vec!["4"]);
    }

    #[test]
    fn test_result_summary() {
        let query = CatalogQuery::from_raw("all", "ban");
        assert_eq!(
            result_summary(&query, 2).as_deref(),
            Some("Showing 2 results for \"ban\"")
        );
        assert_eq!(result_summary(&CatalogQuery::default(), 4), None);
    }

    proptest! {
        #[test]
        fn prop_filter_is_an_ordered_subsequence(search in "[a-zA-Z ]{0,6}", pick in 0usize..9) {
            let products = sample();
            let selector = match pick {
                0 => "all".to_string(),
                1 => "bmx".to_string(),
                n => Category::ALL[n - 2].slug().to_string(),
            };

            let result = filter(&products, &selector, &search);

            // Results appear in catalog order and each one matches
            let positions: Vec<usize> = result
                .iter()
                .map(|r| products.iter().position(|p| p.id == r.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

            let query = CatalogQuery::from_raw(&selector, &search);
            prop_assert_eq!(result.len(), products.iter().filter(|p| query.matches(p)).count());

            // Pure: same inputs, same output
            prop_assert_eq!(ids(&result), ids(&filter(&products, &selector, &search)));
        }
    }
}
