//! # User Repository
//!
//! Registered shoppers. Sign-in resolves an email to a user id; there are
//! no passwords in the local store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// A registered shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Looks a user up by email (case-insensitive, surrounding whitespace ignored).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let email = normalize_email(email);

        let row = sqlx::query(
            "SELECT id, email, display_name, created_at FROM users WHERE email = ?1",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Registers a new user.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn create(&self, email: &str, display_name: &str) -> DbResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: normalize_email(email),
            display_name: display_name.trim().to_string(),
            created_at: Utc::now(),
        };

        debug!(email = %user.email, "Creating user");

        sqlx::query(
            "INSERT INTO users (id, email, display_name, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, user.email.clone()),
            other => other,
        })?;

        Ok(user)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_from_row(row: &SqliteRow) -> DbResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        created_at: row.try_get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    #[tokio::test]
    async fn test_create_and_find_normalizes_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db.users().create("  Rider@Pedal.Test ", "Rider").await.unwrap();
        assert_eq!(created.email, "rider@pedal.test");

        let found = db.users().find_by_email("RIDER@pedal.test").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));

        assert!(db.users().find_by_email("nobody@pedal.test").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users().create("rider@pedal.test", "Rider").await.unwrap();

        let err = db.users().create("rider@pedal.test", "Again").await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "users.email");
                assert_eq!(value, "rider@pedal.test");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
