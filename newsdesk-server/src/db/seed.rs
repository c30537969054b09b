//! Seeding: recreate tables and bulk-load a dataset
//!
//! Datasets are four JSON files (`topics.json`, `users.json`,
//! `articles.json`, `comments.json`). Comments point at their article by
//! title, resolved to ids after the articles are inserted. Timestamps are
//! epoch milliseconds.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use super::schema;
use crate::config::Environment;

/// Seeding error
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Json {
        file: String,
        source: serde_json::Error,
    },

    #[error("comment references unknown article '{title}'")]
    UnknownArticle { title: String },

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicSeed {
    pub slug: String,
    pub description: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSeed {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub votes: i32,
    pub article_img_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSeed {
    pub article_title: String,
    pub body: String,
    #[serde(default)]
    pub votes: i32,
    pub author: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A complete dataset
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub topics: Vec<TopicSeed>,
    pub users: Vec<UserSeed>,
    pub articles: Vec<ArticleSeed>,
    pub comments: Vec<CommentSeed>,
}

/// Row counts written by [`seed`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub topics: usize,
    pub users: usize,
    pub articles: usize,
    pub comments: usize,
}

fn parse<T: DeserializeOwned>(file: &str, raw: &str) -> Result<Vec<T>, SeedError> {
    serde_json::from_str(raw).map_err(|source| SeedError::Json {
        file: file.to_owned(),
        source,
    })
}

impl SeedData {
    /// Parse a dataset from the four JSON documents.
    pub fn from_json(topics: &str, users: &str, articles: &str, comments: &str) -> Result<Self, SeedError> {
        Ok(Self {
            topics: parse("topics.json", topics)?,
            users: parse("users.json", users)?,
            articles: parse("articles.json", articles)?,
            comments: parse("comments.json", comments)?,
        })
    }

    /// Load a dataset directory.
    pub fn load_dir(dir: &Path) -> Result<Self, SeedError> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| SeedError::Io { path, source })
        };

        Self::from_json(
            &read("topics.json")?,
            &read("users.json")?,
            &read("articles.json")?,
            &read("comments.json")?,
        )
    }

    /// The small fixed dataset bundled for tests.
    pub fn test_data() -> Result<Self, SeedError> {
        Self::from_json(
            include_str!("../../data/test/topics.json"),
            include_str!("../../data/test/users.json"),
            include_str!("../../data/test/articles.json"),
            include_str!("../../data/test/comments.json"),
        )
    }

    /// The sample dataset bundled for local development.
    pub fn development_data() -> Result<Self, SeedError> {
        Self::from_json(
            include_str!("../../data/development/topics.json"),
            include_str!("../../data/development/users.json"),
            include_str!("../../data/development/articles.json"),
            include_str!("../../data/development/comments.json"),
        )
    }

    /// Bundled dataset for an environment. Production seeds from the
    /// development sample unless a directory is given.
    pub fn bundled(environment: Environment) -> Result<Self, SeedError> {
        match environment {
            Environment::Test => Self::test_data(),
            Environment::Development | Environment::Production => Self::development_data(),
        }
    }
}

/// Drop and recreate every table, then insert `data`, all in one
/// transaction.
pub async fn seed(pool: &PgPool, data: &SeedData) -> Result<SeedSummary, SeedError> {
    let mut tx = pool.begin().await?;

    schema::drop_tables(&mut tx).await?;
    schema::create_tables(&mut tx).await?;

    insert_topics(&mut tx, &data.topics).await?;
    insert_users(&mut tx, &data.users).await?;
    let article_ids = insert_articles(&mut tx, &data.articles).await?;
    insert_comments(&mut tx, &data.comments, &article_ids).await?;

    tx.commit().await?;

    Ok(SeedSummary {
        topics: data.topics.len(),
        users: data.users.len(),
        articles: data.articles.len(),
        comments: data.comments.len(),
    })
}

async fn insert_topics(conn: &mut PgConnection, topics: &[TopicSeed]) -> Result<(), SeedError> {
    if topics.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO topics (slug, description, img_url) ");
    qb.push_values(topics, |mut row, t| {
        row.push_bind(&t.slug)
            .push_bind(&t.description)
            .push_bind(&t.img_url);
    });
    qb.build().execute(&mut *conn).await?;
    Ok(())
}

async fn insert_users(conn: &mut PgConnection, users: &[UserSeed]) -> Result<(), SeedError> {
    if users.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO users (username, name, avatar_url) ");
    qb.push_values(users, |mut row, u| {
        row.push_bind(&u.username)
            .push_bind(&u.name)
            .push_bind(&u.avatar_url);
    });
    qb.build().execute(&mut *conn).await?;
    Ok(())
}

/// Insert articles and return a title -> article_id map.
async fn insert_articles(
    conn: &mut PgConnection,
    articles: &[ArticleSeed],
) -> Result<HashMap<String, i32>, SeedError> {
    if articles.is_empty() {
        return Ok(HashMap::new());
    }

    let now = Utc::now();
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO articles (title, topic, author, body, created_at, votes, article_img_url) ",
    );
    qb.push_values(articles, |mut row, a| {
        row.push_bind(&a.title)
            .push_bind(&a.topic)
            .push_bind(&a.author)
            .push_bind(&a.body)
            .push_bind(a.created_at.unwrap_or(now))
            .push_bind(a.votes)
            .push_bind(&a.article_img_url);
    });
    qb.push(" RETURNING article_id, title");

    let rows: Vec<(i32, String)> = qb.build_query_as().fetch_all(&mut *conn).await?;
    Ok(rows.into_iter().map(|(id, title)| (title, id)).collect())
}

async fn insert_comments(
    conn: &mut PgConnection,
    comments: &[CommentSeed],
    article_ids: &HashMap<String, i32>,
) -> Result<(), SeedError> {
    if comments.is_empty() {
        return Ok(());
    }

    let resolved = comments
        .iter()
        .map(|c| {
            article_ids
                .get(&c.article_title)
                .map(|id| (*id, c))
                .ok_or_else(|| SeedError::UnknownArticle {
                    title: c.article_title.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let now = Utc::now();
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO comments (article_id, body, votes, author, created_at) ");
    qb.push_values(resolved, |mut row, (article_id, c)| {
        row.push_bind(article_id)
            .push_bind(&c.body)
            .push_bind(c.votes)
            .push_bind(&c.author)
            .push_bind(c.created_at.unwrap_or(now));
    });
    qb.build().execute(&mut *conn).await?;
    Ok(())
}
