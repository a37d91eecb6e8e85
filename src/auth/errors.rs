//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
///
/// Credential failures are collapsed: a store miss and a hash mismatch
/// both surface as [`AuthError::InvalidCredentials`] so the caller cannot
/// enumerate registered emails.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Email or password missing from the login request
    #[error("Email and password are required")]
    MissingCredentials,

    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Token is malformed or carries a bad signature
    #[error("Invalid session token")]
    TokenInvalid,

    /// Token signature is fine but the expiry horizon has passed
    #[error("Session token expired")]
    TokenExpired,

    /// Valid session, but the role does not permit the operation
    #[error("Unauthorized")]
    Unauthorized,

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token signing failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Store access failed (connectivity, corrupt row)
    ///
    /// Kept distinct from the credential failures so clients can tell
    /// "try again" from "bad credentials".
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::MissingCredentials => 400,

            // 401 Unauthorized (no valid session)
            AuthError::InvalidCredentials => 401,
            AuthError::TokenInvalid => 401,
            AuthError::TokenExpired => 401,

            // 403 Forbidden
            AuthError::Unauthorized => 403,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
