//! # Session Materialization
//!
//! Maps decoded token claims back into the session shape the
//! authorization gate and handlers consume.
//!
//! The mapping is total: if the claims carry a role it is always carried
//! over, and a missing or unparseable subject fails loudly instead of
//! producing a half-built session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::token::TokenClaims;
use super::user::Role;

/// The authenticated user as seen by request handlers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub role: Role,
}

/// A materialized session, valid for the lifetime of one request
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from verified token claims
    ///
    /// Fails with `TokenInvalid` when the subject is absent or not a
    /// well-formed id, or when the expiry timestamp is out of range.
    pub fn from_claims(claims: TokenClaims) -> AuthResult<Self> {
        if claims.sub.is_empty() {
            return Err(AuthError::TokenInvalid);
        }

        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::TokenInvalid)?;
        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(AuthError::TokenInvalid)?;

        Ok(Self {
            user: SessionUser {
                id,
                role: claims.role,
            },
            expires_at,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }
}
