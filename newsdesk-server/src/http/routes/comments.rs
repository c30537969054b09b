//! Comment endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::db::{Comment, CommentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryParams};
use crate::http::server::AppState;
use crate::models::{CommentListParams, NewComment};

/// Comment listing; an article without comments also carries a `msg`
#[derive(Serialize)]
pub struct CommentsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<&'static str>,
    pub comments: Vec<Comment>,
}

impl From<Vec<Comment>> for CommentsResponse {
    fn from(comments: Vec<Comment>) -> Self {
        let msg = comments.is_empty().then_some("No Comments ... Yet!");
        Self { msg, comments }
    }
}

#[derive(Serialize)]
pub struct CommentCreatedResponse {
    pub msg: &'static str,
    pub comment: Comment,
}

/// GET /api/articles/{article_id}/comments?sort_by&order
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
    QueryParams(params): QueryParams<CommentListParams>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let comments = CommentRepo::new(&state.pool)
        .list_for_article(&article_id, &params)
        .await?;
    Ok(Json(CommentsResponse::from(comments)))
}

/// POST /api/articles/{article_id}/comments - body `{body, author}`
async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
    JsonBody(new): JsonBody<NewComment>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>), ApiError> {
    let comment = CommentRepo::new(&state.pool).create(&article_id, &new).await?;

    tracing::debug!(comment_id = comment.comment_id, article_id = comment.article_id, "comment added");
    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            msg: "Comment Added",
            comment,
        }),
    ))
}

/// DELETE /api/comments/{comment_id}
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    CommentRepo::new(&state.pool).delete(&comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/articles/{article_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route("/api/comments/{comment_id}", delete(delete_comment))
}
