//! API error type with IntoResponse
//!
//! Every failure is a JSON `{"msg": ...}` body. Status comes from
//! [`DbError::kind`]; store errors that are not classified become a generic
//! 500 and are logged here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::{DbError, ErrorKind};
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Anything raised by a repository operation
    Db(DbError),

    /// Request body was not valid JSON for the endpoint (400)
    MalformedBody,

    /// Query string could not be decoded (400)
    MalformedQuery,

    /// No route matched (404)
    RouteNotFound,

    /// Internal error (500)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Db(e) => status_for(e.kind()),
            Self::MalformedBody | Self::MalformedQuery => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Db(e) => e.message(),
            Self::MalformedBody | Self::MalformedQuery => "Bad Request".to_owned(),
            Self::RouteNotFound => "Route Not Found".to_owned(),
            Self::Internal { .. } => "Internal Server Error".to_owned(),
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput
        | ErrorKind::InvalidSort
        | ErrorKind::InvalidOrder
        | ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::ArticleNotFound
        | ErrorKind::TopicNotFound
        | ErrorKind::UserNotFound
        | ErrorKind::NotFound
        | ErrorKind::NoTopicsFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log the actual error, return generic message
        match &self {
            Self::Db(e) if status.is_server_error() => tracing::error!("Database error: {}", e),
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
            _ => {}
        }

        (status, Json(json!({ "msg": self.message() }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Db(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Db(DbError::Validation(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_msg(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["msg"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn invalid_id_is_400() {
        let err = ApiError::from(ValidationError::InvalidId {
            resource: "Article",
            value: "abc".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_msg(response).await, "Invalid Article ID");
    }

    #[tokio::test]
    async fn invalid_sort_is_400() {
        let err = ApiError::from(ValidationError::InvalidSort { value: "body".into() });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_msg(response).await, "Invalid Sort Request");
    }

    #[tokio::test]
    async fn not_found_kinds_are_404() {
        let errors = [
            DbError::ArticleNotFound { id: 999 },
            DbError::TopicNotFound { slug: "dogs".into() },
            DbError::UserNotFound { username: "nobody".into() },
            DbError::NotFound { resource: "comment", id: "9".into() },
            DbError::NoTopics,
        ];
        for err in errors {
            assert_eq!(ApiError::from(err).status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn store_error_is_generic_500() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_msg(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn malformed_body_and_unknown_route() {
        let response = ApiError::MalformedBody.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_msg(response).await, "Bad Request");

        let response = ApiError::RouteNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_msg(response).await, "Route Not Found");
    }
}
