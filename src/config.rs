//! # Application Configuration
//!
//! One JSON file configures the whole process. Every field has a
//! default, so a missing file or a partial file both work; the signing
//! secret can additionally come from `CANAPE_JWT_SECRET` so it stays out
//! of the config file in production.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::TokenConfig;
use crate::http_server::HttpServerConfig;

/// Environment variable overriding the token signing secret
pub const JWT_SECRET_ENV: &str = "CANAPE_JWT_SECRET";

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP bind address and CORS origins
    #[serde(default)]
    pub http: HttpServerConfig,

    /// sqlx connection string for the SQLite database
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Token signing secret; the environment variable wins over this
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Session token lifetime in hours (default 24, same everywhere)
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_database_url() -> String {
    "sqlite://canape.db?mode=rwc".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            database_url: default_database_url(),
            jwt_secret: None,
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

impl AppConfig {
    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Like [`AppConfig::from_file`], but a missing file means defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the token configuration, applying the env override
    pub fn token_config(&self) -> TokenConfig {
        let secret = std::env::var(JWT_SECRET_ENV)
            .ok()
            .or_else(|| self.jwt_secret.clone())
            .unwrap_or_else(|| TokenConfig::default().secret);

        TokenConfig {
            secret,
            ttl: chrono::Duration::hours(self.token_ttl_hours),
            issuer: "canape".to_string(),
        }
    }
}
