//! canape - backend for a catering studio's website and admin panel
//!
//! Public site content (menu, testimonials, inquiry form) plus a gated
//! admin API, backed by SQLite through sqlx.

pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod store;
