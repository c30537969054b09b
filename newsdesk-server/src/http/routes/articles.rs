//! Article endpoints
//!
//! Path ids arrive as raw strings; the repository validates them so a
//! malformed id is a `400 Invalid Article ID` rather than an extractor
//! rejection.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::{Article, ArticleDetail, ArticleRepo, ArticleSummary};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryParams};
use crate::http::server::AppState;
use crate::models::{ArticleListParams, VotePatch};

#[derive(Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleSummary>,
}

#[derive(Serialize)]
pub struct ArticleResponse {
    pub article: ArticleDetail,
}

#[derive(Serialize)]
pub struct VotesUpdatedResponse {
    pub msg: &'static str,
    pub article: Article,
}

/// GET /api/articles?sort_by&order&topic
async fn list_articles(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ArticleListParams>,
) -> Result<Json<ArticlesResponse>, ApiError> {
    let articles = ArticleRepo::new(&state.pool).list(&params).await?;
    Ok(Json(ArticlesResponse { articles }))
}

/// GET /api/articles/{article_id}
async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = ArticleRepo::new(&state.pool).get(&article_id).await?;
    Ok(Json(ArticleResponse { article }))
}

/// PATCH /api/articles/{article_id} - body `{inc_votes}`
async fn patch_article(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
    JsonBody(patch): JsonBody<VotePatch>,
) -> Result<Json<VotesUpdatedResponse>, ApiError> {
    let article = ArticleRepo::new(&state.pool)
        .increment_votes(&article_id, &patch)
        .await?;

    tracing::debug!(article_id = article.article_id, votes = article.votes, "votes updated");
    Ok(Json(VotesUpdatedResponse {
        msg: "Votes Updated Successfully",
        article,
    }))
}

/// Article routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/articles", get(list_articles))
        .route("/api/articles/{article_id}", get(get_article).patch(patch_article))
}
