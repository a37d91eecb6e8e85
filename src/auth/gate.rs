//! # Authorization Gate
//!
//! Per-request middleware guarding protected routes. Runs before any
//! handler effect: it extracts the bearer token, verifies it, and
//! materializes the [`Session`] as a request extension. A missing,
//! malformed, or expired token denies the request with no side effect.
//!
//! Each request is evaluated independently; there is no state carried
//! between requests.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::errors::{AuthError, AuthResult};
use super::session::Session;
use crate::http_server::state::AppState;

/// Admit any valid session and attach it to the request
///
/// Denials map to 401 via [`AuthError`]'s response conversion.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let session = session_from_headers(&state, request.headers())?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Admit only sessions holding the admin role
///
/// The admin router mounts this instead of [`require_session`]: a valid
/// session without the admin role is refused with `Unauthorized` (403).
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let session = session_from_headers(&state, request.headers())?;

    if !session.is_admin() {
        return Err(AuthError::Unauthorized);
    }

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

fn session_from_headers(state: &AppState, headers: &HeaderMap) -> AuthResult<Session> {
    let token = bearer_token(headers).ok_or(AuthError::TokenInvalid)?;
    let claims = state.tokens.read(token)?;
    Session::from_claims(claims)
}

/// Pull the token out of an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
