//! # Authentication Core
//!
//! Credential verification, stateless session tokens, and the per-request
//! authorization gate for the admin API.
//!
//! Control flow: a client submits credentials, the [`Authenticator`]
//! validates them against the user store, the [`TokenIssuer`] mints a
//! signed token embedding the subject id and role, and the gate in
//! [`gate`] re-validates that token on every protected request.

pub mod authenticator;
pub mod crypto;
pub mod errors;
pub mod gate;
pub mod session;
pub mod token;
pub mod user;

pub use authenticator::Authenticator;
pub use errors::{AuthError, AuthResult};
pub use session::{Session, SessionUser};
pub use token::{TokenClaims, TokenConfig, TokenIssuer};
pub use user::{CredentialClaim, IdentityClaim, Role, UserRecord, UserStore};
