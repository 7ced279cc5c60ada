//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Listing (newest first, as the admin panel shows it)
//! - CRUD from validated `ProductDraft`s
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products row                      ProductRecord                        │
//! │  ─────────────                     ─────────────                        │
//! │  price, original_price  INTEGER →  Money (whole Rupiah)                 │
//! │  category               TEXT    →  Category (sqlx::Type, lowercase)     │
//! │  specifications         TEXT    →  BTreeMap via serde_json              │
//! │  in_stock, featured     INTEGER →  bool                                 │
//! │  stock                  INTEGER →  record.stock                         │
//! │  created_at/updated_at  TEXT    →  DateTime<Utc>                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `in_stock` is written as `stock > 0` on every insert and update.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pedal_core::{Category, Money, Product, ProductDraft, ProductRecord};

const PRODUCT_COLUMNS: &str = "id, name, description, price, original_price, stock, image, \
     category, brand, specifications, in_stock, featured, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let created = repo.insert(&draft).await?;
/// let all = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// All products, newest first.
    pub async fn list(&self) -> DbResult<Vec<ProductRecord>> {
        let sql = format!(
            "SELECT {} FROM products ORDER BY created_at DESC, rowid DESC",
            PRODUCT_COLUMNS
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let records = rows.iter().map(record_from_row).collect::<DbResult<Vec<_>>>()?;

        debug!(count = records.len(), "Listed products");
        Ok(records)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ProductRecord>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// Inserts a new product under a freshly generated id.
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<ProductRecord> {
        let id = generate_product_id();
        let now = Utc::now();
        let specifications = serde_json::to_string(&draft.specifications)?;

        debug!(id = %id, name = %draft.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price, original_price, stock, image,
                category, brand, specifications, in_stock, featured,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10, ?11, ?12,
                ?13, ?14
            )
            "#,
        )
        .bind(&id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price.units())
        .bind(draft.original_price.map(|m| m.units()))
        .bind(draft.stock)
        .bind(&draft.image)
        .bind(draft.category)
        .bind(&draft.brand)
        .bind(&specifications)
        .bind(draft.in_stock())
        .bind(draft.featured)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", &id))
    }

    /// Replaces the editable fields of an existing product.
    ///
    /// ## Returns
    /// * `Ok(record)` - The product as stored after the update
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: &str, draft: &ProductDraft) -> DbResult<ProductRecord> {
        debug!(id = %id, "Updating product");

        let now = Utc::now();
        let specifications = serde_json::to_string(&draft.specifications)?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price = ?4,
                original_price = ?5,
                stock = ?6,
                image = ?7,
                category = ?8,
                brand = ?9,
                specifications = ?10,
                in_stock = ?11,
                featured = ?12,
                updated_at = ?13
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price.units())
        .bind(draft.original_price.map(|m| m.units()))
        .bind(draft.stock)
        .bind(&draft.image)
        .bind(draft.category)
        .bind(&draft.brand)
        .bind(&specifications)
        .bind(draft.in_stock())
        .bind(draft.featured)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product. Cart rows referencing it cascade.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn record_from_row(row: &SqliteRow) -> DbResult<ProductRecord> {
    let specifications: String = row.try_get("specifications")?;
    let specifications: BTreeMap<String, String> = serde_json::from_str(&specifications)?;
    let original_price: Option<i64> = row.try_get("original_price")?;
    let category: Category = row.try_get("category")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    let product = Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: Money::from_units(row.try_get("price")?),
        original_price: original_price.map(Money::from_units),
        image: row.try_get("image")?,
        category,
        brand: row.try_get("brand")?,
        description: row.try_get("description")?,
        specifications,
        in_stock: row.try_get("in_stock")?,
        featured: row.try_get("featured")?,
    };

    Ok(ProductRecord {
        product,
        stock: row.try_get("stock")?,
        created_at,
        updated_at,
    })
}

/// Generates a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use pedal_core::{Category, Money, ProductDraft};
    use std::collections::BTreeMap;

    fn draft(name: &str, stock: i64) -> ProductDraft {
        let mut specifications = BTreeMap::new();
        specifications.insert("Material".to_string(), "Aluminium 6061".to_string());
        ProductDraft {
            name: name.to_string(),
            description: "Deep section rim".to_string(),
            price: Money::from_units(850_000),
            original_price: Some(Money::from_units(1_000_000)),
            stock,
            image: "https://cdn.example.com/velg.jpg".to_string(),
            category: Category::Velg,
            brand: "Vuelta".to_string(),
            featured: true,
            specifications,
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = db().await;
        let created = db.products().insert(&draft("Velg Deep 50mm", 3)).await.unwrap();

        let fetched = db.products().get_by_id(&created.product.id).await.unwrap().unwrap();
        assert_eq!(fetched.product.name, "Velg Deep 50mm");
        assert_eq!(fetched.product.category, Category::Velg);
        assert_eq!(fetched.product.original_price, Some(Money::from_units(1_000_000)));
        assert_eq!(
            fetched.product.specifications.get("Material").map(String::as_str),
            Some("Aluminium 6061")
        );
        assert!(fetched.product.in_stock);
        assert!(fetched.product.featured);
        assert_eq!(fetched.stock, 3);
    }

    #[tokio::test]
    async fn test_in_stock_follows_stock() {
        let db = db().await;
        let created = db.products().insert(&draft("Velg Sold Out", 0)).await.unwrap();
        assert!(!created.product.in_stock);

        let updated = db
            .products()
            .update(&created.product.id, &draft("Velg Restocked", 2))
            .await
            .unwrap();
        assert!(updated.product.in_stock);
        assert_eq!(updated.product.name, "Velg Restocked");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = db().await;
        let first = db.products().insert(&draft("First", 1)).await.unwrap();
        let second = db.products().insert(&draft("Second", 1)).await.unwrap();

        let listed = db.products().list().await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|r| r.product.id.as_str()).collect();
        assert_eq!(ids, vec![second.product.id.as_str(), first.product.id.as_str()]);
        assert_eq!(db.products().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let db = db().await;

        let err = db.products().update("missing", &draft("X", 1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = db.products().delete("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_negative_price() {
        let db = db().await;
        let mut bad = draft("Negative", 1);
        bad.price = Money::from_units(-1);
        bad.original_price = None;

        let err = db.products().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
