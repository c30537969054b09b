//! Route handlers organized by resource

pub mod api;
pub mod articles;
pub mod comments;
pub mod health;
pub mod topics;
pub mod users;

use std::sync::Arc;

use axum::Router;

use super::server::AppState;

/// Every `/api/...` route
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(api::router())
        .merge(topics::router())
        .merge(articles::router())
        .merge(comments::router())
        .merge(users::router())
}
