//! Auth HTTP routes.
//!
//! `/auth/login` accepts a credential claim and answers with a session
//! token; `/auth/session` echoes the current session back to the client
//! and doubles as a cheap "am I still logged in" probe.
//!
//! Login failures always produce the same generic body, whatever the
//! underlying cause; the handler never says which field was wrong.

use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::state::AppState;
use crate::auth::gate::require_session;
use crate::auth::{AuthError, CredentialClaim, IdentityClaim, Session};

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route(
            "/session",
            get(session_handler)
                .route_layer(middleware::from_fn_with_state(state.clone(), require_session)),
        )
        .with_state(state)
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The session token; clients send it back as a bearer header or
    /// store it in a cookie, their choice
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: IdentityClaim,
}

/// Login handler
async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(claim): Json<CredentialClaim>,
) -> Result<Json<LoginResponse>, AuthError> {
    let identity = state.authenticator.authenticate(&claim).await?;
    let token = state.tokens.issue(&identity)?;

    Ok(Json(LoginResponse {
        token,
        token_type: "bearer".to_string(),
        expires_at: state.tokens.expires_at(),
        user: identity,
    }))
}

/// Session echo handler (gated by `require_session`)
async fn session_handler(Extension(session): Extension<Session>) -> Json<Session> {
    Json(session)
}
