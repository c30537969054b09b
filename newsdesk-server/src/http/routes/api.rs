//! API documentation endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::value::RawValue;

use crate::http::error::ApiError;

/// Static description of every endpoint
const ENDPOINTS: &str = include_str!("../endpoints.json");

#[derive(Serialize)]
pub struct EndpointsResponse {
    pub endpoints: &'static RawValue,
}

/// GET /api
async fn endpoints() -> Result<Json<EndpointsResponse>, ApiError> {
    let endpoints = serde_json::from_str(ENDPOINTS).map_err(|e| ApiError::Internal {
        message: format!("endpoints.json: {e}"),
    })?;
    Ok(Json(EndpointsResponse { endpoints }))
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api", get(endpoints))
}
