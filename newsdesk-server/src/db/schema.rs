//! Table creation for topics, users, articles and comments
//!
//! Runtime code only ever creates missing tables. Dropping is reserved for
//! the seeder.

use sqlx::{PgConnection, PgPool};

/// Foreign key from comments to articles. Named so insert failures can be
/// told apart from the author key.
pub const COMMENTS_ARTICLE_FK: &str = "comments_article_id_fkey";

/// Foreign key from comments to users
pub const COMMENTS_AUTHOR_FK: &str = "comments_author_fkey";

const CREATE_TABLES: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS topics (
        slug VARCHAR PRIMARY KEY NOT NULL,
        description VARCHAR,
        img_url VARCHAR(1000)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username VARCHAR PRIMARY KEY NOT NULL,
        name VARCHAR NOT NULL,
        avatar_url VARCHAR(1000)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        article_id SERIAL PRIMARY KEY NOT NULL,
        title VARCHAR NOT NULL,
        topic VARCHAR NOT NULL REFERENCES topics(slug) ON DELETE CASCADE,
        author VARCHAR NOT NULL REFERENCES users(username) ON DELETE CASCADE,
        body TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        votes INT NOT NULL DEFAULT 0,
        article_img_url VARCHAR(1000)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        comment_id SERIAL PRIMARY KEY NOT NULL,
        article_id INT NOT NULL,
        body TEXT NOT NULL,
        votes INT NOT NULL DEFAULT 0,
        author VARCHAR NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT comments_article_id_fkey FOREIGN KEY (article_id)
            REFERENCES articles(article_id) ON DELETE CASCADE,
        CONSTRAINT comments_author_fkey FOREIGN KEY (author)
            REFERENCES users(username)
    )
    "#,
];

const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_articles_topic ON articles (LOWER(topic))",
    "CREATE INDEX IF NOT EXISTS idx_comments_article ON comments (article_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_author ON comments (author)",
];

/// Reverse dependency order
const DROP_TABLES: [&str; 4] = [
    "DROP TABLE IF EXISTS comments CASCADE",
    "DROP TABLE IF EXISTS articles CASCADE",
    "DROP TABLE IF EXISTS users CASCADE",
    "DROP TABLE IF EXISTS topics CASCADE",
];

/// Create all tables and indexes that do not exist yet.
pub async fn create_tables(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for stmt in CREATE_TABLES.iter().chain(CREATE_INDEXES.iter()) {
        sqlx::query(stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Drop every table, cascading to dependent rows.
pub async fn drop_tables(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for stmt in DROP_TABLES {
        sqlx::query(stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Ensure the schema exists. Called once at server startup.
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring database schema...");
    let mut conn = pool.acquire().await?;
    create_tables(&mut conn).await?;
    tracing::info!("Database schema ready");
    Ok(())
}
