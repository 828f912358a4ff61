//! Shared helpers for HTTP integration tests.
//!
//! Each test builds the production router with [`build_test_app`] and drives
//! it with `tower::ServiceExt::oneshot`; no socket is opened.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use ironlog_api::auth::tokens::TokenConfig;
use ironlog_api::config::ServerConfig;
use ironlog_api::router::build_app_router;
use ironlog_api::state::AppState;

/// Password used by [`register`] unless a test picks its own.
pub const TEST_PASSWORD: &str = "pw123456";

/// Build a test `ServerConfig` with development defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        min_password_length: 6,
        tokens: TokenConfig::default(),
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request through the router.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Register `username` (email `<username>@test.com`) and return the user JSON.
pub async fn register(app: Router, username: &str) -> Value {
    let body = json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Log in and return the plaintext bearer token.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let body = json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/tokens/authentication", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register and log in; returns `(user_id, token)`.
pub async fn register_and_login(app: Router, username: &str) -> (i64, String) {
    let user = register(app.clone(), username).await;
    let token = login(app, username, TEST_PASSWORD).await;
    (user["id"].as_i64().unwrap(), token)
}

/// A workout body with one rep-based and one timed entry.
pub fn sample_workout(title: &str) -> Value {
    json!({
        "title": title,
        "description": "upper body",
        "duration_minutes": 60,
        "calories_burned": 500,
        "entries": [
            {
                "exercise_name": "Bench Press",
                "sets": 3,
                "reps": 10,
                "weight": 85.5,
                "order_index": 1
            },
            {
                "exercise_name": "Plank",
                "sets": 3,
                "duration_seconds": 60,
                "order_index": 2
            }
        ]
    })
}
