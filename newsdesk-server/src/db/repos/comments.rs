//! Comment repository
//!
//! Handles comment listing, creation and hard deletion. Every mutation
//! validates its input before the first query and checks the parent row
//! exists before writing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::query::CommentListQuery;
use crate::models::{ArticleId, CommentId, CommentListParams, NewComment};

use super::{ArticleRepo, DbError};

/// Comment record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub comment_id: i32,
    pub article_id: i32,
    pub body: String,
    pub votes: i32,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List comments for an article, sorted by an allow-listed column.
    ///
    /// An existing article with no comments gives an empty list.
    pub async fn list_for_article(
        &self,
        raw_article_id: &str,
        params: &CommentListParams,
    ) -> Result<Vec<Comment>, DbError> {
        let article_id = ArticleId::parse(raw_article_id)?;
        let query = CommentListQuery::from_params(params)?;

        if !ArticleRepo::new(self.pool).exists(article_id).await? {
            return Err(DbError::ArticleNotFound {
                id: article_id.get(),
            });
        }

        let comments = query
            .build(article_id.get())
            .build_query_as::<Comment>()
            .fetch_all(self.pool)
            .await?;

        Ok(comments)
    }

    /// Add a comment to an article.
    ///
    /// `created_at` is set by the database and `votes` starts at 0; neither
    /// can be supplied by the caller. An unknown author is reported by the
    /// foreign key as `UserNotFound`.
    pub async fn create(&self, raw_article_id: &str, new: &NewComment) -> Result<Comment, DbError> {
        let article_id = ArticleId::parse(raw_article_id)?;
        let comment = new.validate()?;

        if !ArticleRepo::new(self.pool).exists(article_id).await? {
            return Err(DbError::ArticleNotFound {
                id: article_id.get(),
            });
        }

        // The existence check above is not atomic with this insert; a
        // concurrent delete is caught by the article foreign key instead.
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (article_id, body, author, votes, created_at)
            VALUES ($1, $2, $3, 0, NOW())
            RETURNING comment_id, article_id, body, votes, author, created_at
            "#,
        )
        .bind(article_id.get())
        .bind(comment.body)
        .bind(comment.author)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_comment_insert(e, article_id.get(), comment.author))
    }

    /// Delete a comment by raw path id. Hard delete, nothing returned.
    pub async fn delete(&self, raw_comment_id: &str) -> Result<(), DbError> {
        let id = CommentId::parse(raw_comment_id)?;

        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM comments WHERE comment_id = $1)")
                .bind(id.get())
                .fetch_one(self.pool)
                .await?;

        if !exists {
            return Err(DbError::NotFound {
                resource: "comment",
                id: id.get().to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(id.get())
            .execute(self.pool)
            .await?;

        // Deleted by someone else between the check and here
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "comment",
                id: id.get().to_string(),
            });
        }

        Ok(())
    }
}
