//! SQLite connection pooling for the catalog.
//!
//! The catalog is written by one scanner at a time but read concurrently by
//! page resolution, so WAL mode is the default. Foreign keys are switched on
//! for every pool because the schema relies on cascade deletes (magazine ->
//! issues -> articles).

use kiosk_core::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// Database connection pool
pub type DbPool = Pool<Sqlite>;

/// Connection settings for the catalog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Enable Write-Ahead Logging (WAL) mode
    pub enable_wal: bool,
    /// Create database if it doesn't exist
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "kiosk.db".to_string(),
            max_connections: 10,
            enable_wal: true,
            create_if_missing: true,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_wal(mut self, enable: bool) -> Self {
        self.enable_wal = enable;
        self
    }

    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    fn connect_options(&self) -> Result<SqliteConnectOptions, AppError> {
        let mut options = SqliteConnectOptions::from_str(&format!("sqlite:{}", self.path))
            .map_err(|e| AppError::database("Invalid database path", e))?
            .create_if_missing(self.create_if_missing)
            .foreign_keys(true);

        if self.enable_wal {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        Ok(options)
    }
}

/// Opens a pool against the configured catalog database.
pub async fn connect(config: DatabaseConfig) -> Result<DbPool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
        .map_err(|e| AppError::database("Failed to connect to database", e))?;

    Ok(pool)
}

/// Creates an in-memory database for testing
#[cfg(test)]
pub async fn create_test_db() -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| AppError::database("Failed to create test database", e))?
        .journal_mode(SqliteJournalMode::Memory)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database("Failed to connect to test database", e))?;

    Ok(pool)
}
