//! # Catalog Commands
//!
//! Product listing, search and detail lookups.
//!
//! ## Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Listing Flow                                 │
//! │                                                                         │
//! │  Shopper picks category "ban" and types "kenda"                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  list_products(session, "ban", "kenda")                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogQuery::from_raw → Catalog::filter (pure, catalog order)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogResponse { products, summary: "Showing 1 results for ..." }    │
//! │                                                                         │
//! │  The catalog is loaded from the backend once (refresh_catalog) and     │
//! │  filtered locally on every keystroke.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::SessionState;
use pedal_core::catalog::result_summary;
use pedal_core::{CatalogQuery, Category, CoreError, Money, Product, StoreBackend};

/// Product card data for the UI.
///
/// Adds the presentation values the card shows (formatted price, discount
/// badge) to the catalog fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub price: Money,
    /// e.g. "Rp 850.000"
    pub price_label: String,
    #[ts(optional)]
    pub original_price: Option<Money>,
    /// 0 when not discounted.
    pub discount_percent: u32,
    pub image: String,
    pub description: String,
    pub specifications: std::collections::BTreeMap<String, String>,
    pub in_stock: bool,
    pub featured: bool,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id.clone(),
            name: p.name.clone(),
            brand: p.brand.clone(),
            category: p.category,
            price: p.price,
            price_label: p.price.to_string(),
            original_price: p.original_price,
            discount_percent: p.discount_percent(),
            image: p.image.clone(),
            description: p.description.clone(),
            specifications: p.specifications.clone(),
            in_stock: p.in_stock,
            featured: p.featured,
        }
    }
}

/// Result of a listing request.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogResponse {
    pub products: Vec<ProductDto>,
    /// Result-count line, present only while searching.
    #[ts(optional)]
    pub summary: Option<String>,
}

/// Reloads the session catalog from the backend.
///
/// On failure the previous catalog stays in place.
pub async fn refresh_catalog<B: StoreBackend>(
    backend: &B,
    session: &mut SessionState,
) -> Result<usize, ApiError> {
    let start = Instant::now();
    let catalog = backend.load_catalog().await?;
    let count = catalog.len();
    session.catalog = catalog;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count,
        "Catalog loaded"
    );
    Ok(count)
}

/// Lists products matching a category selector ("all" or a slug) and a
/// search string.
pub fn list_products(session: &SessionState, category: &str, query: &str) -> CatalogResponse {
    let start = Instant::now();
    debug!(category = %category, query = %query, "list_products command");

    let catalog_query = CatalogQuery::from_raw(category, query);
    let products: Vec<ProductDto> = session
        .catalog
        .filter(&catalog_query)
        .into_iter()
        .map(ProductDto::from)
        .collect();
    let summary = result_summary(&catalog_query, products.len());

    debug!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        "list_products complete"
    );

    CatalogResponse { products, summary }
}

/// Products highlighted on the landing page.
pub fn featured_products(session: &SessionState) -> Vec<ProductDto> {
    session.catalog.featured().map(ProductDto::from).collect()
}

/// Gets a single product for the detail view.
pub fn get_product(session: &SessionState, id: &str) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "get_product command");
    session
        .catalog
        .get(id)
        .map(ProductDto::from)
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pedal_core::Catalog;

    fn session() -> SessionState {
        SessionState::with_catalog(Catalog::new(vec![
            Product::new("1", "Fixie A", Money::from_units(1_000_000), Category::Fixie, "Brand1")
                .mark_featured(),
            Product::new("2", "Velg B", Money::from_units(500_000), Category::Velg, "Brand2")
                .with_original_price(Money::from_units(625_000)),
            Product::new("3", "Ban Slick", Money::from_units(95_000), Category::Ban, "Kenda"),
        ]))
    }

    #[test]
    fn test_list_all_has_no_summary() {
        let response = list_products(&session(), "all", "");
        assert_eq!(response.products.len(), 3);
        assert_eq!(response.summary, None);
    }

    #[test]
    fn test_search_adds_summary() {
        let response = list_products(&session(), "all", "KENDA");
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].id, "3");
        assert_eq!(response.summary.as_deref(), Some("Showing 1 results for \"KENDA\""));
    }

    #[test]
    fn test_dto_presentation_fields() {
        let dto = get_product(&session(), "2").unwrap();
        assert_eq!(dto.price_label, "Rp 500.000");
        assert_eq!(dto.discount_percent, 20);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["priceLabel"], "Rp 500.000");
        assert_eq!(json["category"], "velg");
    }

    #[test]
    fn test_unknown_product() {
        let err = get_product(&session(), "99").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_featured() {
        let featured = featured_products(&session());
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].id, "1");
    }
}
