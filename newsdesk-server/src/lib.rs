//! newsdesk-server: REST backend for articles, topics, users and comments
//!
//! Three layers:
//! - `models`: request validation, no I/O
//! - `db`: pool, schema, seeding and repositories over Postgres
//! - `http`: axum router mapping repository results to JSON

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AppConfig, ConfigError, DatabaseConfig, Environment};
pub use db::{create_lazy_pool, create_pool, create_pool_with_options, DbError, ErrorKind};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
