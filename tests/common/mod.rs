#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bookstore_api::{app, apply_migrations, bookstore_model, connect, cors_layer, AppState, StaticCredentials};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

pub const ADMIN_USER: &str = "manager";
pub const ADMIN_PASSWORD: &str = "correct horse";

// Fresh in-memory store with tables provisioned
pub async fn setup_app() -> Router {
    setup_app_with(&[]).await.0
}

// Same, with CORS restricted to `origins`; the pool is returned for tests that break the store
pub async fn setup_app_with(origins: &[String]) -> (Router, SqlitePool) {
    let model = bookstore_model().expect("catalog");
    let pool = connect("sqlite::memory:").await.expect("Failed to open store");
    apply_migrations(&pool, &model).await.expect("Failed to migrate");
    let credentials = StaticCredentials::from_plaintext(ADMIN_USER, ADMIN_PASSWORD, 4).expect("hash");
    let state = AppState::new(pool.clone(), model, Arc::new(credentials));
    (app(state, cors_layer(origins)), pool)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, json)
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &'static str) -> StatusCode {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(req).await.unwrap().status()
}
