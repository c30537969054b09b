//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and timeouts.
//! The pool is built once at startup and handed to the router state;
//! repositories borrow it per request.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Create a PostgreSQL connection pool with default limits.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/newsdesk").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(&DatabaseConfig::new(database_url)).await
}

/// Create a PostgreSQL connection pool from explicit settings.
///
/// Every connection gets a server-side `statement_timeout`, so a stuck
/// query fails instead of holding a pool slot forever.
pub async fn create_pool_with_options(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let connect = connect_options(config)?;

    tracing::debug!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout.as_secs(),
        "creating database pool"
    );

    pool_options(config).connect_with(connect).await
}

/// Build a pool that only connects on first use.
///
/// Handy for tests and tooling that may never touch the database.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let connect = connect_options(config)?;
    Ok(pool_options(config).connect_lazy_with(connect))
}

fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let timeout_ms = config.statement_timeout.as_millis().to_string();
    Ok(PgConnectOptions::from_str(&config.url)?.options([("statement_timeout", timeout_ms)]))
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Duration::from_secs(600))
}
