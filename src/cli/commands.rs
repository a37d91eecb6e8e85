//! CLI command implementations
//!
//! Boot order is always the same: parse args, initialize tracing, load
//! configuration, open the store, then do the command's work. The async
//! runtime is built here; `main` stays free of setup.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::auth::{Role, UserRecord, UserStore};
use crate::config::AppConfig;
use crate::http_server::{AppState, HttpServer};
use crate::store::{self, SqliteUserStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Entry point called from `main`
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_tracing();

    match cli.command {
        Command::Serve { config } => serve(&config),
        Command::InitDb { config } => init_db(&config),
        Command::CreateAdmin {
            config,
            email,
            password,
            name,
            role,
        } => create_admin(&config, email, password, name, &role),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Server(e.to_string()))
}

fn load_config(path: &Path) -> CliResult<AppConfig> {
    AppConfig::load_or_default(path).map_err(|e| CliError::Config(e.to_string()))
}

/// Boot the HTTP server and block until it exits
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    runtime()?.block_on(async {
        let pool = store::connect(&config.database_url)
            .await
            .map_err(|e| CliError::Storage(e.to_string()))?;

        let state = Arc::new(AppState::new(pool, config.token_config()));

        HttpServer::with_config(config.http.clone(), state)
            .start()
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    })
}

/// Create the schema and exit
pub fn init_db(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    runtime()?.block_on(async {
        store::connect(&config.database_url)
            .await
            .map_err(|e| CliError::Storage(e.to_string()))?;
        Ok(())
    })?;

    println!("Database ready at {}", config.database_url);
    Ok(())
}

/// Seed an admin panel user
pub fn create_admin(
    config_path: &Path,
    email: String,
    password: String,
    name: Option<String>,
    role: &str,
) -> CliResult<()> {
    if !email.contains('@') {
        return Err(CliError::InvalidInput(format!(
            "'{email}' does not look like an email address"
        )));
    }
    if password.len() < 8 {
        return Err(CliError::InvalidInput(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let role: Role = role
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("role must be 'admin' or 'staff', got '{role}'")))?;

    let config = load_config(config_path)?;

    let user = runtime()?.block_on(async {
        let pool = store::connect(&config.database_url)
            .await
            .map_err(|e| CliError::Storage(e.to_string()))?;

        let users = SqliteUserStore::new(pool);
        let user = UserRecord::new(email, &password, name, role)
            .map_err(|e| CliError::Storage(e.to_string()))?;

        users
            .create(&user)
            .await
            .map_err(|e| CliError::Storage(e.to_string()))?;

        Ok::<_, CliError>(user)
    })?;

    println!("Created {} user {} ({})", user.role.as_str(), user.email, user.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_admin_rejects_bad_input() {
        let config = Path::new("./does-not-exist.json");

        let result = create_admin(
            config,
            "not-an-email".to_string(),
            "password123".to_string(),
            None,
            "admin",
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));

        let result = create_admin(
            config,
            "a@example.com".to_string(),
            "short".to_string(),
            None,
            "admin",
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));

        let result = create_admin(
            config,
            "a@example.com".to_string(),
            "password123".to_string(),
            None,
            "owner",
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_init_db_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("canape.db");
        let config_path = dir.path().join("canape.json");

        let config = AppConfig {
            database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
            ..AppConfig::default()
        };
        std::fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();

        init_db(&config_path).unwrap();
        assert!(db_path.exists());
    }
}
