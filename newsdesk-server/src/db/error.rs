//! Data-access error type
//!
//! Every repository operation returns `Result<T, DbError>`. The HTTP layer
//! only needs [`DbError::kind`] and [`DbError::message`] to build a response.

use crate::models::ValidationError;

use super::schema::{COMMENTS_ARTICLE_FK, COMMENTS_AUTHOR_FK};

/// SQLSTATEs raised by the store for values the client sent: text it could
/// not parse (22P02), a number out of the column's range (22003) and a
/// character the encoding rejects, e.g. NUL (22021)
const BAD_INPUT_CODES: [&str; 3] = ["22P02", "22003", "22021"];

/// Failure category, one per distinct caller-visible outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InvalidSort,
    InvalidOrder,
    ArticleNotFound,
    TopicNotFound,
    UserNotFound,
    NotFound,
    BadRequest,
    NoTopicsFound,
    Internal,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Article Not Found")]
    ArticleNotFound { id: i32 },

    #[error("Topic Not Found")]
    TopicNotFound { slug: String },

    #[error("User Not Found")]
    UserNotFound { username: String },

    #[error("Not Found")]
    NotFound { resource: &'static str, id: String },

    #[error("No Topics Found")]
    NoTopics,

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(v) => match v {
                ValidationError::InvalidId { .. } => ErrorKind::InvalidInput,
                ValidationError::InvalidSort { .. } => ErrorKind::InvalidSort,
                ValidationError::InvalidOrder { .. } => ErrorKind::InvalidOrder,
                ValidationError::Missing { .. } | ValidationError::InvalidField { .. } => {
                    ErrorKind::BadRequest
                }
            },
            Self::ArticleNotFound { .. } => ErrorKind::ArticleNotFound,
            Self::TopicNotFound { .. } => ErrorKind::TopicNotFound,
            Self::UserNotFound { .. } => ErrorKind::UserNotFound,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NoTopics => ErrorKind::NoTopicsFound,
            Self::Sqlx(e) if is_bad_input(e) => ErrorKind::BadRequest,
            Self::Sqlx(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to show to a client. Raw store errors are never echoed.
    pub fn message(&self) -> String {
        match (self, self.kind()) {
            (Self::Sqlx(_), ErrorKind::BadRequest) => "Bad Request".to_owned(),
            (Self::Sqlx(_), _) => "Internal Server Error".to_owned(),
            _ => self.to_string(),
        }
    }

    /// Classify a failed comment insert.
    ///
    /// A foreign-key violation means either the author or the article row is
    /// missing; the constraint name tells which. Any other constraint is left
    /// unclassified.
    pub(crate) fn from_comment_insert(err: sqlx::Error, article_id: i32, author: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_foreign_key_violation() {
                match db.constraint() {
                    Some(COMMENTS_ARTICLE_FK) => return Self::ArticleNotFound { id: article_id },
                    Some(COMMENTS_AUTHOR_FK) => {
                        return Self::UserNotFound {
                            username: author.to_owned(),
                        }
                    }
                    _ => {}
                }
            }
        }
        Self::Sqlx(err)
    }
}

fn is_bad_input(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| BAD_INPUT_CODES.contains(&&*code)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_kinds() {
        let err = DbError::from(ValidationError::InvalidId {
            resource: "Article",
            value: "x".into(),
        });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "Invalid Article ID");

        let err = DbError::from(ValidationError::InvalidOrder { value: "up".into() });
        assert_eq!(err.kind(), ErrorKind::InvalidOrder);

        let err = DbError::from(ValidationError::Missing { field: "body" });
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.message(), "Bad Request");
    }

    #[test]
    fn not_found_messages() {
        assert_eq!(DbError::ArticleNotFound { id: 999 }.message(), "Article Not Found");
        assert_eq!(
            DbError::TopicNotFound { slug: "dogs".into() }.message(),
            "Topic Not Found"
        );
        assert_eq!(
            DbError::UserNotFound { username: "nobody".into() }.kind(),
            ErrorKind::UserNotFound
        );
        assert_eq!(DbError::NoTopics.message(), "No Topics Found");
        assert_eq!(
            DbError::NotFound { resource: "comment", id: "7".into() }.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn store_errors_are_internal_and_opaque() {
        let err = DbError::Sqlx(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.message(), "Internal Server Error");
    }

    #[test]
    fn non_fk_insert_errors_pass_through() {
        let err = DbError::from_comment_insert(sqlx::Error::RowNotFound, 1, "lurker");
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
