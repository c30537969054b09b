//! User repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;

/// User record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users. An empty table is `NotFound`.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users: Vec<User> =
            sqlx::query_as("SELECT username, name, avatar_url FROM users ORDER BY username")
                .fetch_all(self.pool)
                .await?;

        if users.is_empty() {
            return Err(DbError::NotFound {
                resource: "users",
                id: String::new(),
            });
        }
        Ok(users)
    }

    /// Get a single user by username.
    pub async fn get(&self, username: &str) -> Result<User, DbError> {
        sqlx::query_as("SELECT username, name, avatar_url FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::UserNotFound {
                username: username.to_owned(),
            })
    }
}
