//! CLI module for canape
//!
//! Provides the command-line interface:
//! - serve: boot the HTTP server
//! - init-db: create the database schema and exit
//! - create-admin: seed an admin user (user creation is out-of-band)

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
