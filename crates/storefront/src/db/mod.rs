//! Database operations for the storefront `SQLite` file.
//!
//! # Tables
//!
//! - `users` - Site authentication
//! - `products` - Catalog rows seeded by the admin reset
//! - `cart_items` - Per-user cart rows with a price snapshot
//! - `contact_messages` - Contact form submissions
//! - `subscribers` - Newsletter signups
//! - `tower_sessions` - Session storage (created by the session store)
//!
//! # Schema
//!
//! There is no migration tooling; the schema lives in [`schema`] as DDL
//! constants. [`schema::init_schema`] runs `CREATE TABLE IF NOT EXISTS` at
//! startup, and the admin reset endpoint drops and recreates everything.
//!
//! All queries are runtime-checked (`sqlx::query` / `query_as`) rather than
//! the compile-time macros, so builds never need a live database or an
//! offline query cache.

pub mod cart;
pub mod contact;
pub mod newsletter;
pub mod products;
pub mod schema;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use cart::CartRepository;
pub use contact::ContactRepository;
pub use newsletter::NewsletterRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if it does not exist yet.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://clothkart.db`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
