//! # Session Token Issuer/Reader
//!
//! Signed, stateless session tokens. Validity is determined solely by
//! signature and expiry; there is no server-side session table and no
//! revocation list. A token dies by expiring or by the client dropping it.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};
use super::user::{IdentityClaim, Role};

/// Claims embedded in every session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Role at mint time; not re-checked against the store per request
    pub role: Role,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for signing (server-held, never exposed to clients)
    pub secret: String,

    /// Session token lifetime
    pub ttl: Duration,

    /// Issuer identifier
    pub issuer: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string(),
            // Session horizon: 24 hours. One value, every environment;
            // override through configuration, never per-deployment drift.
            ttl: Duration::hours(24),
            issuer: "canape".to_string(),
        }
    }
}

/// Issues and reads signed session tokens (HS256)
#[derive(Clone)]
pub struct TokenIssuer {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Mint a session token for a verified identity
    ///
    /// Embeds `sub = id` and the role held at mint time, plus `iat`/`exp`
    /// metadata. No secret material ever enters the claims.
    pub fn issue(&self, identity: &IdentityClaim) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now + self.config.ttl;

        let claims = TokenClaims {
            sub: identity.id.to_string(),
            role: identity.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Verify a token's signature and expiry and extract its claims
    ///
    /// Expiry is exact (no leeway): a token is rejected at and after its
    /// `exp` timestamp. Signature and malformation failures collapse into
    /// `TokenInvalid`; callers treat both that and `TokenExpired` as
    /// "no session".
    pub fn read(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.leeway = 0;

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })?;

        Ok(token_data.claims)
    }

    /// Expiry instant a token minted right now would carry
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc::now() + self.config.ttl
    }
}
