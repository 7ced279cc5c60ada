//! # Cart Repository
//!
//! Persisted cart rows, one per (user, product).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart_items                                                             │
//! │  ┌──────────┬────────────┬──────────┐                                  │
//! │  │ user_id  │ product_id │ quantity │   PRIMARY KEY (user, product)    │
//! │  ├──────────┼────────────┼──────────┤                                  │
//! │  │ u-1      │ fx-01      │ 2        │   quantity > 0 (CHECK)           │
//! │  │ u-1      │ vg-03      │ 1        │                                  │
//! │  └──────────┴────────────┴──────────┘                                  │
//! │                                                                         │
//! │  upsert(qty > 0)  → INSERT ... ON CONFLICT DO UPDATE                    │
//! │  upsert(qty ≤ 0)  → DELETE (a zero-quantity row never exists)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use pedal_core::CartLine;

/// Repository for cart rows.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// The user's cart lines in the order they were first written.
    pub async fn list(&self, user_id: &str) -> DbResult<Vec<CartLine>> {
        let rows = sqlx::query(
            "SELECT product_id, quantity FROM cart_items WHERE user_id = ?1 ORDER BY rowid",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let lines = rows
            .iter()
            .map(|row| -> DbResult<CartLine> {
                let product_id: String = row.try_get("product_id")?;
                Ok(CartLine::new(product_id, row.try_get("quantity")?))
            })
            .collect::<DbResult<Vec<_>>>()?;

        debug!(user_id = %user_id, count = lines.len(), "Loaded cart lines");
        Ok(lines)
    }

    /// Sets the quantity for one product; a quantity of zero or less
    /// deletes the row instead.
    pub async fn upsert(&self, user_id: &str, product_id: &str, quantity: i64) -> DbResult<()> {
        if quantity <= 0 {
            return self.delete(user_id, product_id).await;
        }

        debug!(user_id = %user_id, product_id = %product_id, quantity, "Upserting cart line");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT (user_id, product_id) DO UPDATE SET
                quantity = excluded.quantity,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes one row. Missing rows are not an error.
    pub async fn delete(&self, user_id: &str, product_id: &str) -> DbResult<()> {
        debug!(user_id = %user_id, product_id = %product_id, "Deleting cart line");

        sqlx::query("DELETE FROM cart_items WHERE user_id = ?1 AND product_id = ?2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Deletes every row for the user, returning how many were removed.
    pub async fn clear(&self, user_id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
