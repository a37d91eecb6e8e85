//! CLI argument definitions using clap
//!
//! Commands:
//! - canape serve --config <path>
//! - canape init-db --config <path>
//! - canape create-admin --config <path> --email <email> --password <pw>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// canape - backend for a catering studio's website and admin panel
#[derive(Parser, Debug)]
#[command(name = "canape")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./canape.json")]
        config: PathBuf,
    },

    /// Create the database schema and exit
    InitDb {
        /// Path to configuration file
        #[arg(long, default_value = "./canape.json")]
        config: PathBuf,
    },

    /// Create an admin panel user
    CreateAdmin {
        /// Path to configuration file
        #[arg(long, default_value = "./canape.json")]
        config: PathBuf,

        /// Email address (the login key, matched case-sensitively)
        #[arg(long)]
        email: String,

        /// Password (minimum 8 characters)
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Role: "admin" or "staff"
        #[arg(long, default_value = "admin")]
        role: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
