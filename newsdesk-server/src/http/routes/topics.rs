//! Topic endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::{Topic, TopicRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,
}

/// GET /api/topics
async fn list_topics(State(state): State<Arc<AppState>>) -> Result<Json<TopicsResponse>, ApiError> {
    let topics = TopicRepo::new(&state.pool).list().await?;
    Ok(Json(TopicsResponse { topics }))
}

/// Topic routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/topics", get(list_topics))
}
