//! # StoreBackend for SQLite
//!
//! Wires the repositories into the backend contract declared in
//! `pedal-core`. Each call maps `DbError` into `BackendError` via `?`.

use tracing::{info, warn};

use pedal_core::{
    BackendError, BackendResult, CartLine, ProductDraft, ProductRecord, StoreBackend, UserId,
};

use crate::error::DbError;
use crate::pool::Database;

impl StoreBackend for Database {
    async fn authenticate(&self, email: &str) -> BackendResult<UserId> {
        match self.users().find_by_email(email).await? {
            Some(user) => {
                info!(user_id = %user.id, "User authenticated");
                Ok(UserId::new(user.id))
            }
            None => {
                warn!(email = %email.trim(), "Sign-in for unknown email");
                Err(BackendError::unauthenticated(format!(
                    "No account registered for {}",
                    email.trim()
                )))
            }
        }
    }

    async fn list_products(&self) -> BackendResult<Vec<ProductRecord>> {
        Ok(self.products().list().await?)
    }

    async fn get_product(&self, id: &str) -> BackendResult<ProductRecord> {
        self.products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id).into())
    }

    async fn insert_product(&self, draft: &ProductDraft) -> BackendResult<ProductRecord> {
        Ok(self.products().insert(draft).await?)
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> BackendResult<ProductRecord> {
        Ok(self.products().update(id, draft).await?)
    }

    async fn delete_product(&self, id: &str) -> BackendResult<()> {
        Ok(self.products().delete(id).await?)
    }

    async fn load_cart(&self, user: &UserId) -> BackendResult<Vec<CartLine>> {
        Ok(self.carts().list(user.as_str()).await?)
    }

    async fn upsert_cart_line(&self, user: &UserId, product_id: &str, quantity: i64) -> BackendResult<()> {
        Ok(self.carts().upsert(user.as_str(), product_id, quantity).await?)
    }

    async fn delete_cart_line(&self, user: &UserId, product_id: &str) -> BackendResult<()> {
        Ok(self.carts().delete(user.as_str(), product_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
