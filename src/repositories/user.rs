//! User repository for database operations

use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::{error::AppError, models::User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account with an already-hashed password
    ///
    /// Fails with `DuplicateUsername` when the name is taken; the
    /// UNIQUE constraint backs the pre-check, so a racing duplicate
    /// insert fails without mutating state.
    pub async fn register(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        info!("Registering new user: {}", username);

        if self.find_by_username(username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(row) => Ok(User {
                id: row.get("id"),
                username: row.get("username"),
                password_hash: row.get("password_hash"),
            }),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(User {
                id: row.get("id"),
                username: row.get("username"),
                password_hash: row.get("password_hash"),
            })),
            None => Ok(None),
        }
    }

    /// Count stored accounts
    pub async fn count(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;

    async fn test_repository() -> UserRepository {
        let pool = database::init_pool("sqlite::memory:", 1).await.unwrap();
        database::init_schema(&pool).await.unwrap();
        UserRepository::new(pool)
    }

    #[tokio::test]
    async fn test_register_and_find() {
        let repo = test_repository().await;

        let user = repo.register("alice", "phc-hash").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "phc-hash");

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration_leaves_store_unchanged() {
        let repo = test_repository().await;

        repo.register("alice", "hash-one").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        let err = repo.register("alice", "hash-two").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername));
        assert_eq!(repo.count().await.unwrap(), 1);

        // The original hash is untouched
        let stored = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "hash-one");
    }
}
