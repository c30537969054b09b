//! Topic repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;

/// Topic record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub slug: String,
    pub description: Option<String>,
    pub img_url: Option<String>,
}

/// Topic repository
pub struct TopicRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TopicRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all topics.
    ///
    /// Topics are seeded and never deleted, so an empty table is treated as
    /// an error rather than an empty list.
    pub async fn list(&self) -> Result<Vec<Topic>, DbError> {
        let topics: Vec<Topic> =
            sqlx::query_as("SELECT slug, description, img_url FROM topics ORDER BY slug")
                .fetch_all(self.pool)
                .await?;

        if topics.is_empty() {
            return Err(DbError::NoTopics);
        }
        Ok(topics)
    }

    /// Case-insensitive existence check by slug.
    pub async fn exists(&self, slug: &str) -> Result<bool, DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM topics WHERE LOWER(slug) = LOWER($1))")
                .bind(slug)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }
}
