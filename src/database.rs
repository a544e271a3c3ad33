//! Database connection, pooling, and schema setup

use std::str::FromStr;

use anyhow::Result;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{error, info};

/// Initialize a SQLite connection pool
///
/// The database file is created if it does not exist yet.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    info!("Initializing database connection pool");

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Create the users table if it does not exist
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}

/// Check database connectivity
pub async fn health_check(pool: &SqlitePool) -> Result<bool> {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => {
            info!("Database health check successful");
            Ok(true)
        }
        Err(e) => {
            error!("Database health check failed: {}", e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_and_schema() {
        let pool = init_pool("sqlite::memory:", 1).await.unwrap();
        init_schema(&pool).await.unwrap();

        // Schema setup is idempotent
        init_schema(&pool).await.unwrap();

        assert!(health_check(&pool).await.unwrap());
    }
}
