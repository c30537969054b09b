//! Router tests against a freshly seeded database
//!
//! Each test gets its own database from `#[sqlx::test]` loaded with the
//! bundled test dataset.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use newsdesk_server::db::seed::{seed, SeedData};
use newsdesk_server::{build_router, AppState};

async fn seeded_app(pool: PgPool) -> Router {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    seed(&pool, &SeedData::test_data().unwrap()).await.unwrap();
    build_router(AppState { pool }, false)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

#[sqlx::test]
#[ignore = "requires database"]
async fn post_comment_is_201_and_ignores_client_votes(pool: PgPool) {
    let app = seeded_app(pool).await;
    let request = json_request(
        Method::POST,
        "/api/articles/1/comments",
        r#"{"body":"well said","author":"lurker","votes":99}"#,
    );

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["msg"], "Comment Added");
    assert_eq!(body["comment"]["article_id"], 1);
    assert_eq!(body["comment"]["body"], "well said");
    assert_eq!(body["comment"]["author"], "lurker");
    assert_eq!(body["comment"]["votes"], 0);
    assert!(body["comment"]["comment_id"].is_i64());
    assert!(body["comment"]["created_at"].is_string());
}

#[sqlx::test]
#[ignore = "requires database"]
async fn post_comment_from_unknown_user_is_404(pool: PgPool) {
    let app = seeded_app(pool).await;
    let request = json_request(
        Method::POST,
        "/api/articles/1/comments",
        r#"{"body":"hello","author":"not_a_user"}"#,
    );

    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore = "requires database"]
async fn post_comment_with_nul_is_400(pool: PgPool) {
    let app = seeded_app(pool).await;
    let request = json_request(
        Method::POST,
        "/api/articles/1/comments",
        r#"{"body":"a\u0000b","author":"lurker"}"#,
    );

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Bad Request");
}

#[sqlx::test]
#[ignore = "requires database"]
async fn delete_comment_is_204_with_empty_body(pool: PgPool) {
    let app = seeded_app(pool).await;
    let delete = || Request::delete("/api/comments/1").body(Body::empty()).unwrap();

    let (status, body) = send(app.clone(), delete()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(app, delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore = "requires database"]
async fn patch_votes_is_200_with_updated_article(pool: PgPool) {
    let app = seeded_app(pool).await;
    let request = json_request(Method::PATCH, "/api/articles/1", r#"{"inc_votes":-10}"#);

    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Votes Updated Successfully");
    assert_eq!(body["article"]["article_id"], 1);
    assert_eq!(body["article"]["votes"], 90);

    let (status, body) = send(app, get("/api/articles/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["article"]["votes"], 90);
}

#[sqlx::test]
#[ignore = "requires database"]
async fn patch_votes_past_int_range_is_400(pool: PgPool) {
    let app = seeded_app(pool).await;
    let request = json_request(
        Method::PATCH,
        "/api/articles/1",
        r#"{"inc_votes":2147483647}"#,
    );

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Bad Request");
}

#[sqlx::test]
#[ignore = "requires database"]
async fn topic_filter_with_nul_is_400(pool: PgPool) {
    let app = seeded_app(pool).await;

    let (status, body) = send(app, get("/api/articles?topic=ca%00ts")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Bad Request");
}

#[sqlx::test]
#[ignore = "requires database"]
async fn get_user_by_username(pool: PgPool) {
    let app = seeded_app(pool).await;

    let (status, body) = send(app.clone(), get("/api/users/lurker")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "lurker");
    assert_eq!(body["user"]["name"], "do_nothing");
    assert!(body["user"]["avatar_url"].is_string());

    let (status, _) = send(app, get("/api/users/nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
