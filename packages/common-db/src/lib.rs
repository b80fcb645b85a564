//! Common DB - shared persistence layer for the triage service
//!
//! This library provides:
//! - Row models for patients, assessments and the audit log
//! - Automatic database migrations
//! - Connection pool setup for SQLite
//! - The query layer used by the web service

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;

/// Database connection configuration
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite file
    pub db_path: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_path: "data/triage.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Initializes the SQLite connection pool and applies pending migrations
pub async fn init_db_pool(config: &DbConfig) -> Result<SqlitePool> {
    let db_path = Path::new(&config.db_path);

    if let Some(parent) = db_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).context("failed to create database directory")?;
        }
    }

    let connection_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true)
        .pragma("synchronous", "NORMAL");

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connection_options)
        .await
        .context("failed to connect to the SQLite database")?;

    migrations::run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;

    info!("database initialized at {}", config.db_path);
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_db_connection() -> Result<()> {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test.db");

        let config = DbConfig {
            db_path: db_path.to_str().unwrap().to_string(),
            max_connections: 2,
        };

        let pool = init_db_pool(&config).await?;

        let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await?;
        assert_eq!(result.0, 1);

        Ok(())
    }
}
