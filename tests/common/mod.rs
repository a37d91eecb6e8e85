//! Shared helpers for the route-level integration tests.
//!
//! Each test gets its own in-memory database seeded with one admin and
//! one staff user, and drives the real router via `tower`'s `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use canape::auth::{Role, TokenConfig, UserRecord, UserStore};
use canape::http_server::{AppState, HttpServer, HttpServerConfig};
use canape::store::{self, SqliteUserStore};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery";
pub const STAFF_EMAIL: &str = "staff@example.com";
pub const STAFF_PASSWORD: &str = "another fine password";

pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        secret: TEST_SECRET.to_string(),
        ttl: chrono::Duration::hours(24),
        issuer: "canape".to_string(),
    }
}

/// Fresh app over an in-memory database, seeded with two users
pub async fn test_app() -> (Router, Arc<AppState>) {
    let pool = store::connect("sqlite::memory:").await.unwrap();

    let users = SqliteUserStore::new(pool.clone());
    let admin = UserRecord::new(
        ADMIN_EMAIL.to_string(),
        ADMIN_PASSWORD,
        Some("Admin".to_string()),
        Role::Admin,
    )
    .unwrap();
    users.create(&admin).await.unwrap();

    let staff = UserRecord::new(STAFF_EMAIL.to_string(), STAFF_PASSWORD, None, Role::Staff)
        .unwrap();
    users.create(&staff).await.unwrap();

    let state = Arc::new(AppState::new(pool, test_token_config()));
    let router = HttpServer::with_config(HttpServerConfig::default(), state.clone()).router();

    (router, state)
}

/// Send one request through the router and decode the JSON body
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Log in and return the whole response
pub async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    request(
        app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await
}

/// Log in as the seeded admin and return a usable bearer token
pub async fn admin_token(app: &Router) -> String {
    let (status, body) = login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}
