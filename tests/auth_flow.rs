//! End-to-end authentication and authorization behavior.
//!
//! Drives the full router: credential submission, token handling on
//! protected routes, and the ways a request gets denied.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use canape::auth::{IdentityClaim, Role, TokenConfig, TokenIssuer};

use common::{
    admin_token, login, request, test_app, ADMIN_EMAIL, ADMIN_PASSWORD, STAFF_EMAIL,
    STAFF_PASSWORD, TEST_SECRET,
};

#[tokio::test]
async fn login_returns_token_and_identity() {
    let (app, _state) = test_app().await;

    let (status, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);

    // A signed three-segment token
    let token = body["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(body["token_type"], "bearer");

    // Identity claim carries id/email/role, never hash material
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"]["id"].as_str().is_some());
    assert!(body["user"].get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let (app, _state) = test_app().await;

    let (wrong_status, wrong_body) = login(&app, ADMIN_EMAIL, "wrong password").await;
    let (unknown_status, unknown_body) = login(&app, "nobody@example.com", "whatever").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);

    // Identical shape and identical message; no token either way
    assert_eq!(wrong_body, unknown_body);
    assert!(wrong_body.get("token").is_none());
}

#[tokio::test]
async fn blank_credentials_rejected_before_lookup() {
    let (app, _state) = test_app().await;

    let (status, body) = login(&app, ADMIN_EMAIL, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());

    let (status, _) = login(&app, "", "secret").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn token_admits_admin_routes_and_session_echo() {
    let (app, _state) = test_app().await;
    let token = admin_token(&app).await;

    let (status, body) = request(&app, "GET", "/auth/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");

    let (status, body) = request(&app, "GET", "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["menu_items"], 0);
    assert_eq!(body["new_inquiries"], 0);
    assert_eq!(body["pending_testimonials"], 0);
}

#[tokio::test]
async fn missing_token_is_denied() {
    let (app, _state) = test_app().await;

    let (status, _) = request(&app, "GET", "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, "GET", "/auth/session", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_denied() {
    let (app, _state) = test_app().await;
    let token = admin_token(&app).await;

    // Flip a character inside the signature segment
    let mut parts: Vec<String> = token.split('.').map(String::from).collect();
    let sig = parts[2].clone();
    let flipped: String = sig
        .char_indices()
        .map(|(i, c)| if i == 0 { if c == 'A' { 'B' } else { 'A' } } else { c })
        .collect();
    parts[2] = flipped;
    let tampered = parts.join(".");

    let (status, _) = request(&app, "GET", "/api/admin/dashboard", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_denied_with_no_side_effect() {
    let (app, _state) = test_app().await;
    let live_token = admin_token(&app).await;

    // Mint an already-expired token with the server's own secret
    let (_, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let admin_id = Uuid::parse_str(body["user"]["id"].as_str().unwrap()).unwrap();

    let expired_issuer = TokenIssuer::new(TokenConfig {
        secret: TEST_SECRET.to_string(),
        ttl: chrono::Duration::seconds(-60),
        issuer: "canape".to_string(),
    });
    let expired = expired_issuer
        .issue(&IdentityClaim {
            id: admin_id,
            email: ADMIN_EMAIL.to_string(),
            name: None,
            role: Role::Admin,
        })
        .unwrap();

    let (status, _) = request(
        &app,
        "POST",
        "/api/admin/testimonials",
        Some(&expired),
        Some(json!({ "author": "Mallory", "quote": "Should never land" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The denied request mutated nothing
    let (status, body) = request(&app, "GET", "/api/admin/testimonials", Some(&live_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn staff_session_is_valid_but_not_admin() {
    let (app, _state) = test_app().await;

    let (status, body) = login(&app, STAFF_EMAIL, STAFF_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    // The session itself is fine...
    let (status, body) = request(&app, "GET", "/auth/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "staff");

    // ...but the admin surface refuses it
    let (status, _) = request(&app, "GET", "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn gate_runs_before_payload_validation() {
    let (app, _state) = test_app().await;

    // An unauthenticated request with a garbage payload must be answered
    // by the gate, not the handler's validation
    let (status, _) = request(
        &app,
        "POST",
        "/api/admin/menu",
        None,
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_public_content_need_no_session() {
    let (app, _state) = test_app().await;

    let (status, body) = request(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = request(&app, "GET", "/api/menu", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&app, "GET", "/api/testimonials", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
