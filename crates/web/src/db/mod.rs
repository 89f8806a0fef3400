//! Database operations for the cafe catalogue (SQLite).
//!
//! # Tables
//!
//! - `user` - Registered accounts (argon2id password hashes, display names)
//! - `cafe` - Catalogued cafes with amenity flags and an optional contributor
//! - `tower_sessions` - Session storage, owned by tower-sessions
//!
//! # Migrations
//!
//! Schema migrations live in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p coffee-wifi-cli -- migrate
//! ```
//! The session table is managed by the session store itself, not by these
//! migrations (see `middleware::create_session_layer`).

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub mod cafes;
pub mod users;

pub use cafes::CafeRepository;
pub use users::UserRepository;

/// Embedded schema migrations (from `crates/web/migrations/`).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

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

    /// Constraint violation (e.g., unique cafe name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a SQLite connection pool with sensible defaults.
///
/// The database file is created on first use; foreign keys are enforced so a
/// cafe's `user_id` always references an existing user.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string is invalid or the database
/// cannot be opened.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

#[cfg(test)]
pub(crate) mod testutils {
    use super::{MIGRATOR, SqlitePool, SqlitePoolOptions};

    /// An in-memory pool with the schema applied.
    ///
    /// A single connection keeps every query on the same in-memory database.
    #[allow(clippy::unwrap_used)]
    pub async fn pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }
}
