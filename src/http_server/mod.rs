//! # HTTP Server Module
//!
//! The JSON API for the site frontend and the admin panel.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/auth/*` - Login and session echo
//! - `/api/*` - Public site content (menu, testimonials, inquiry form)
//! - `/api/admin/*` - Admin panel, gated by the authorization middleware

pub mod admin_routes;
pub mod auth_routes;
pub mod config;
pub mod responses;
pub mod server;
pub mod site_routes;
pub mod state;

pub use config::HttpServerConfig;
pub use server::HttpServer;
pub use state::AppState;
