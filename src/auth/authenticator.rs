//! # Authenticator
//!
//! Orchestrates credential lookup and password verification, producing an
//! identity claim or a rejection.
//!
//! Exactly one read-only store access happens per attempt, and only after
//! both fields pass the presence check. There is no mutation, no lockout
//! counter, and no audit trail here.

use std::sync::Arc;

use super::errors::{AuthError, AuthResult};
use super::user::{CredentialClaim, IdentityClaim, UserStore};

/// Validates credential claims against the user store
///
/// The store handle is injected at construction; nothing in here holds
/// cross-request mutable state.
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Authenticate a credential claim
    ///
    /// A missing field fails before any store access. An unknown email and
    /// a wrong password both collapse into `InvalidCredentials`; the two
    /// cases must stay externally indistinguishable.
    pub async fn authenticate(&self, claim: &CredentialClaim) -> AuthResult<IdentityClaim> {
        if claim.email.is_empty() || claim.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .users
            .find_by_email(&claim.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&claim.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(IdentityClaim::from_record(&user))
    }
}
