//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Validates raw request input before the first query
//! - Uses JOINs for comment counts (no N+1)
//! - Leaves referential integrity to foreign keys and classifies the failure

pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

pub use super::error::{DbError, ErrorKind};
pub use articles::{Article, ArticleDetail, ArticleRepo, ArticleSummary};
pub use comments::{Comment, CommentRepo};
pub use topics::{Topic, TopicRepo};
pub use users::{User, UserRepo};
