//! Article repository
//!
//! - get: single article with body and comment count
//! - list: sort/order/topic listing, one query with LEFT JOIN count
//! - increment_votes: existence check, then atomic `votes = votes + $1`

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::query::{article_detail_sql, ArticleListQuery};
use crate::models::{ArticleId, ArticleListParams, VotePatch};

use super::{DbError, TopicRepo};

/// Article record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
}

/// Article with its comment count
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub article: Article,
    pub comment_count: i64,
}

/// Listing row: every article column except `body`, plus comment count
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleSummary {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}

/// Article repository
pub struct ArticleRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArticleRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get one article by raw path id.
    ///
    /// Malformed ids fail before the database is touched.
    pub async fn get(&self, raw_id: &str) -> Result<ArticleDetail, DbError> {
        let id = ArticleId::parse(raw_id)?;

        let sql = article_detail_sql();
        sqlx::query_as::<_, ArticleDetail>(&sql)
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::ArticleNotFound { id: id.get() })
    }

    /// List articles with optional topic filter, sorted by an allow-listed
    /// column.
    ///
    /// An existing topic with no articles gives an empty list; an unknown
    /// topic is `TopicNotFound` and the listing query never runs.
    pub async fn list(&self, params: &ArticleListParams) -> Result<Vec<ArticleSummary>, DbError> {
        let query = ArticleListQuery::from_params(params)?;

        if let Some(topic) = query.topic {
            if !TopicRepo::new(self.pool).exists(topic).await? {
                return Err(DbError::TopicNotFound {
                    slug: topic.to_owned(),
                });
            }
        }

        let articles = query
            .build()
            .build_query_as::<ArticleSummary>()
            .fetch_all(self.pool)
            .await?;

        Ok(articles)
    }

    /// Add `inc_votes` to an article's votes and return the updated row.
    ///
    /// Negative and zero increments are accepted as-is; votes are not
    /// clamped.
    pub async fn increment_votes(&self, raw_id: &str, patch: &VotePatch) -> Result<Article, DbError> {
        let id = ArticleId::parse(raw_id)?;
        let inc_votes = patch.increment()?;

        if !self.exists(id).await? {
            return Err(DbError::ArticleNotFound { id: id.get() });
        }

        // Row may have been deleted since the check
        sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET votes = votes + $1
            WHERE article_id = $2
            RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url
            "#,
        )
        .bind(inc_votes)
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::ArticleNotFound { id: id.get() })
    }

    /// Check whether an article row exists.
    pub async fn exists(&self, id: ArticleId) -> Result<bool, DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM articles WHERE article_id = $1)")
                .bind(id.get())
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_lazy_pool;
    use crate::db::seed::{seed, SeedData};
    use crate::config::DatabaseConfig;
    use crate::db::ErrorKind;
    use crate::models::ValidationError;

    fn unreachable_pool() -> PgPool {
        let mut config = DatabaseConfig::new("postgres://newsdesk@127.0.0.1:1/unreachable");
        config.acquire_timeout = std::time::Duration::from_millis(200);
        create_lazy_pool(&config).expect("lazy pool")
    }

    async fn seeded(pool: &PgPool) {
        let data = SeedData::test_data().expect("test data parses");
        seed(pool, &data).await.expect("seed failed");
    }

    // A store round-trip on the unreachable pool would surface as
    // DbError::Sqlx, so a Validation error proves no query was issued.

    #[tokio::test]
    async fn get_rejects_non_numeric_id_without_store_call() {
        let pool = unreachable_pool();
        let err = ArticleRepo::new(&pool).get("not-an-id").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::InvalidId { resource: "Article", .. })
        ));
    }

    #[tokio::test]
    async fn list_rejects_bad_sort_without_store_call() {
        let pool = unreachable_pool();
        let params = ArticleListParams {
            sort_by: Some("body".into()),
            ..Default::default()
        };
        let err = ArticleRepo::new(&pool).list(&params).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(ValidationError::InvalidSort { .. })));
    }

    #[tokio::test]
    async fn list_rejects_bad_order_without_store_call() {
        let pool = unreachable_pool();
        let params = ArticleListParams {
            order: Some("random".into()),
            topic: Some("cats".into()),
            ..Default::default()
        };
        let err = ArticleRepo::new(&pool).list(&params).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(ValidationError::InvalidOrder { .. })));
    }

    #[tokio::test]
    async fn patch_rejects_missing_increment_without_store_call() {
        let pool = unreachable_pool();
        let err = ArticleRepo::new(&pool)
            .increment_votes("1", &VotePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(ValidationError::Missing { .. })));
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn get_counts_comments(pool: PgPool) {
        seeded(&pool).await;
        let repo = ArticleRepo::new(&pool);

        let article = repo.get("3").await.unwrap();
        let (expected,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM comments WHERE article_id = 3")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(article.article.article_id, 3);
        assert_eq!(article.article.votes, 0);
        assert_eq!(article.comment_count, expected);
        assert_eq!(article.comment_count, 2);
        assert!(!article.article.body.is_empty());

        let quiet = repo.get("2").await.unwrap();
        assert_eq!(quiet.comment_count, 0);
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn get_missing_article(pool: PgPool) {
        seeded(&pool).await;
        let err = ArticleRepo::new(&pool).get("9999").await.unwrap_err();
        assert!(matches!(err, DbError::ArticleNotFound { id: 9999 }));
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn list_defaults_to_newest_first(pool: PgPool) {
        seeded(&pool).await;
        let articles = ArticleRepo::new(&pool)
            .list(&ArticleListParams::default())
            .await
            .unwrap();

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(articles.len() as i64, total);
        assert!(articles
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn list_sorts_by_requested_column(pool: PgPool) {
        seeded(&pool).await;
        let params = ArticleListParams {
            sort_by: Some("title".into()),
            order: Some("asc".into()),
            topic: None,
        };
        let articles = ArticleRepo::new(&pool).list(&params).await.unwrap();
        assert!(articles.windows(2).all(|pair| pair[0].title <= pair[1].title));
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn list_filters_by_topic_case_insensitively(pool: PgPool) {
        seeded(&pool).await;
        let params = ArticleListParams {
            topic: Some("CATS".into()),
            ..Default::default()
        };
        let articles = ArticleRepo::new(&pool).list(&params).await.unwrap();
        assert!(!articles.is_empty());
        assert!(articles.iter().all(|a| a.topic == "cats"));
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn list_topic_without_articles_is_empty(pool: PgPool) {
        seeded(&pool).await;
        let params = ArticleListParams {
            topic: Some("paper".into()),
            ..Default::default()
        };
        let articles = ArticleRepo::new(&pool).list(&params).await.unwrap();
        assert!(articles.is_empty());
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn list_unknown_topic(pool: PgPool) {
        seeded(&pool).await;
        let params = ArticleListParams {
            topic: Some("dogs".into()),
            ..Default::default()
        };
        let err = ArticleRepo::new(&pool).list(&params).await.unwrap_err();
        assert!(matches!(err, DbError::TopicNotFound { .. }));
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn increment_votes_persists(pool: PgPool) {
        seeded(&pool).await;
        let repo = ArticleRepo::new(&pool);

        let updated = repo.increment_votes("4", &VotePatch::new(50)).await.unwrap();
        assert_eq!(updated.votes, 50);
        assert_eq!(repo.get("4").await.unwrap().article.votes, 50);

        let updated = repo.increment_votes("4", &VotePatch::new(-80)).await.unwrap();
        assert_eq!(updated.votes, -30);
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn increment_by_zero_is_a_noop(pool: PgPool) {
        seeded(&pool).await;
        let repo = ArticleRepo::new(&pool);
        let before = repo.get("1").await.unwrap().article.votes;

        let updated = repo.increment_votes("1", &VotePatch::new(0)).await.unwrap();
        assert_eq!(updated.votes, before);
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn increment_missing_article(pool: PgPool) {
        seeded(&pool).await;
        let err = ArticleRepo::new(&pool)
            .increment_votes("9999", &VotePatch::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ArticleNotFound { id: 9999 }));

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles WHERE article_id = 9999")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn increment_past_int_range_is_bad_request(pool: PgPool) {
        seeded(&pool).await;
        let repo = ArticleRepo::new(&pool);

        let err = repo
            .increment_votes("1", &VotePatch::new(i32::MAX))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.message(), "Bad Request");
        assert_eq!(repo.get("1").await.unwrap().article.votes, 100);
    }

    #[sqlx::test]
    #[ignore = "requires database"]
    async fn list_topic_with_nul_is_bad_request(pool: PgPool) {
        seeded(&pool).await;
        let params = ArticleListParams {
            topic: Some("ca\0ts".into()),
            ..Default::default()
        };
        let err = ArticleRepo::new(&pool).list(&params).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}
