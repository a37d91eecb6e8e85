//! # User Identities
//!
//! The user record held by the credential store, the transient credential
//! claim submitted at login, and the identity claim produced by a
//! successful authentication.
//!
//! The authentication core only reads user records; they are created
//! out-of-band through the `create-admin` CLI command.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password};
use super::errors::{AuthError, AuthResult};

/// Role attached to a user record and carried into session tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to the admin panel
    Admin,
    /// Authenticated but not permitted on admin routes
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            other => Err(AuthError::StorageError(format!("unknown role: {other}"))),
        }
    }
}

/// User record as held by the credential store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user identifier
    pub id: Uuid,

    /// Email address, the case-sensitive lookup key (unique)
    pub email: String,

    /// Argon2id password hash (never plaintext, never serialized)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Role granted at creation time
    pub role: Role,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new user record with a freshly hashed password
    pub fn new(email: String, password: &str, name: Option<String>, role: Role) -> AuthResult<Self> {
        let password_hash = hash_password(password)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verify a password candidate against this record's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// Credential claim submitted at login
///
/// Transient: exists only for the duration of one authentication attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialClaim {
    pub email: String,
    pub password: String,
}

/// Verified, minimal representation of who a user is
///
/// Built from a [`UserRecord`] after the password check; carries no hash
/// material and is what gets embedded into session tokens.
#[derive(Debug, Clone, Serialize)]
pub struct IdentityClaim {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
}

impl IdentityClaim {
    /// Derive an identity claim from a stored record, dropping the hash
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            name: record.name.clone(),
            role: record.role,
        }
    }
}

/// Credential store seam
///
/// Abstracts user lookups so the authenticator can be exercised against
/// a fake in tests. Lookups are exact and case-sensitive on email.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by their email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserRecord>>;

    /// Find a user by their ID
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserRecord>>;

    /// Create a new user
    async fn create(&self, user: &UserRecord) -> AuthResult<()>;
}

/// In-memory user store for testing
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: std::sync::RwLock<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserRecord>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserRecord>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &UserRecord) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::StorageError(format!(
                "email already registered: {}",
                user.email
            )));
        }

        users.push(user.clone());
        Ok(())
    }
}
