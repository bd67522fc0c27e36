//! SQLite connection setup. One process-wide connection, opened once at startup.

use crate::error::{AppError, ConfigError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Open the store at `database_url` (e.g. `sqlite://inventory.db`, `sqlite::memory:`), creating
/// the file if missing. The pool holds exactly one connection that never expires, so an
/// in-memory database lives as long as the pool.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| {
            AppError::Config(ConfigError::InvalidSetting {
                key: "DATABASE_URL",
                message: e.to_string(),
            })
        })?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(opts)
        .await?;
    tracing::info!(url = %database_url, "connected to SQLite store");
    Ok(pool)
}
