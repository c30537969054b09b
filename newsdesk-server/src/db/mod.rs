//! Database layer - connection pool, schema, seeding and repositories
//!
//! # Design Principles
//!
//! - Pool is injected into each repository; no global handle
//! - Sort columns come from allow-lists; every other value is bound
//! - Rely on DB constraints for referential integrity, classify the failure
//! - The data-access layer returns errors and never logs them

pub mod error;
pub mod pool;
pub mod query;
pub mod repos;
pub mod schema;
pub mod seed;

pub use error::{DbError, ErrorKind};
pub use pool::{create_lazy_pool, create_pool, create_pool_with_options};
pub use repos::*;
