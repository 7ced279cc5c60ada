//! # Backend Contract
//!
//! The storefront optionally talks to a hosted database/auth service. This
//! module declares what the rest of the system expects from it; `pedal-db`
//! provides the SQLite implementation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    StoreBackend                                         │
//! │                                                                         │
//! │  auth      authenticate(email)            → UserId                     │
//! │                                                                         │
//! │  products  list_products()                → newest first               │
//! │            get_product(id)                                             │
//! │            insert_product(draft)          → record with new id         │
//! │            update_product(id, draft)                                   │
//! │            delete_product(id)                                          │
//! │                                                                         │
//! │  cart      load_cart(user)                → Vec<CartLine>              │
//! │            upsert_cart_line(user, product_id, quantity)                │
//! │            delete_cart_line(user, product_id)                          │
//! │                                                                         │
//! │  Every call returns Ok(value) or BackendError { kind, message }.       │
//! │  No retries: the caller decides what to tell the user.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::types::{ProductDraft, ProductRecord};

// =============================================================================
// Identity & Records
// =============================================================================

/// Identity of a signed-in shopper, as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted cart row: which product, how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

impl CartLine {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        CartLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Broad category of a backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendErrorKind {
    /// No signed-in user, or the credentials were rejected.
    Unauthenticated,
    /// The addressed row does not exist.
    NotFound,
    /// A uniqueness or reference constraint was violated.
    Constraint,
    /// The service could not be reached.
    Unavailable,
    Internal,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BackendErrorKind::Unauthenticated => "unauthenticated",
            BackendErrorKind::NotFound => "not_found",
            BackendErrorKind::Constraint => "constraint",
            BackendErrorKind::Unavailable => "unavailable",
            BackendErrorKind::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Structured backend failure: a user-displayable message plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        BackendError {
            kind,
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        BackendError::new(BackendErrorKind::Unauthenticated, message)
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        BackendError::new(BackendErrorKind::NotFound, format!("{} not found: {}", entity, id))
    }
}

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

// =============================================================================
// Trait
// =============================================================================

/// Persistence and authentication collaborator.
///
/// Implementations are used from a single session task, so the futures are
/// not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait StoreBackend {
    /// Resolves a registered shopper by email.
    ///
    /// Unknown emails fail with [`BackendErrorKind::Unauthenticated`].
    async fn authenticate(&self, email: &str) -> BackendResult<UserId>;

    /// All products, newest first.
    async fn list_products(&self) -> BackendResult<Vec<ProductRecord>>;

    /// A single product; [`BackendErrorKind::NotFound`] if absent.
    async fn get_product(&self, id: &str) -> BackendResult<ProductRecord>;

    /// Creates a product, assigning its id and timestamps.
    async fn insert_product(&self, draft: &ProductDraft) -> BackendResult<ProductRecord>;

    /// Replaces the editable fields of an existing product.
    async fn update_product(&self, id: &str, draft: &ProductDraft) -> BackendResult<ProductRecord>;

    async fn delete_product(&self, id: &str) -> BackendResult<()>;

    /// The user's persisted cart, in the order lines were first written.
    async fn load_cart(&self, user: &UserId) -> BackendResult<Vec<CartLine>>;

    /// Writes the quantity for one product, creating the row if needed.
    async fn upsert_cart_line(&self, user: &UserId, product_id: &str, quantity: i64) -> BackendResult<()>;

    /// Deletes the row if present. Absent rows are not an error.
    async fn delete_cart_line(&self, user: &UserId, product_id: &str) -> BackendResult<()>;

    /// The storefront catalog, in the backend's listing order.
    async fn load_catalog(&self) -> BackendResult<Catalog> {
        let records = self.list_products().await?;
        Ok(Catalog::new(records.into_iter().map(|r| r.product).collect()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Category, Product};
    use chrono::Utc;

    /// Backend holding a fixed product list; everything else is unsupported.
    struct FixedCatalog(Vec<Product>);

    impl StoreBackend for FixedCatalog {
        async fn authenticate(&self, _email: &str) -> BackendResult<UserId> {
            Err(BackendError::unauthenticated("not supported"))
        }

        async fn list_products(&self) -> BackendResult<Vec<ProductRecord>> {
            let now = Utc::now();
            Ok(self
                .0
                .iter()
                .cloned()
                .map(|product| ProductRecord {
                    product,
                    stock: 1,
                    created_at: now,
                    updated_at: now,
                })
                .collect())
        }

        async fn get_product(&self, id: &str) -> BackendResult<ProductRecord> {
            Err(BackendError::not_found("Product", id))
        }

        async fn insert_product(&self, _draft: &ProductDraft) -> BackendResult<ProductRecord> {
            Err(BackendError::new(BackendErrorKind::Internal, "read-only"))
        }

        async fn update_product(&self, id: &str, _draft: &ProductDraft) -> BackendResult<ProductRecord> {
            Err(BackendError::not_found("Product", id))
        }

        async fn delete_product(&self, id: &str) -> BackendResult<()> {
            Err(BackendError::not_found("Product", id))
        }

        async fn load_cart(&self, _user: &UserId) -> BackendResult<Vec<CartLine>> {
            Ok(Vec::new())
        }

        async fn upsert_cart_line(&self, _user: &UserId, _product_id: &str, _quantity: i64) -> BackendResult<()> {
            Ok(())
        }

        async fn delete_cart_line(&self, _user: &UserId, _product_id: &str) -> BackendResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_catalog_keeps_listing_order() {
        let backend = FixedCatalog(vec![
            Product::new("b", "Velg B", Money::from_units(500_000), Category::Velg, "Brand2"),
            Product::new("a", "Fixie A", Money::from_units(1_000_000), Category::Fixie, "Brand1"),
        ]);

        let catalog = backend.load_catalog().await.unwrap();
        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_error_display_is_the_message() {
        let err = BackendError::not_found("Product", "x1");
        assert_eq!(err.to_string(), "Product not found: x1");
        assert_eq!(err.kind, BackendErrorKind::NotFound);
        assert_eq!(err.kind.to_string(), "not_found");
    }
}
