//! CLI-specific error types
//!
//! All CLI errors are fatal: they print to stderr and exit non-zero.

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("CANAPE_CONFIG_ERROR: {0}")]
    Config(String),

    #[error("CANAPE_STORAGE_ERROR: {0}")]
    Storage(String),

    #[error("CANAPE_SERVER_ERROR: {0}")]
    Server(String),

    #[error("CANAPE_INVALID_INPUT: {0}")]
    InvalidInput(String),
}
