//! Shared application state.
//!
//! Built once at startup from the connection pool and token configuration,
//! then handed to every router. Handlers reach collaborators through this
//! state instead of module-scope singletons.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{Authenticator, TokenConfig, TokenIssuer};
use crate::store::{
    SqliteInquiryStore, SqliteMenuStore, SqliteTestimonialStore, SqliteUserStore,
};

/// Everything the request handlers need, wired up front
pub struct AppState {
    pub authenticator: Authenticator,
    pub tokens: TokenIssuer,
    pub menu: SqliteMenuStore,
    pub inquiries: SqliteInquiryStore,
    pub testimonials: SqliteTestimonialStore,
}

impl AppState {
    pub fn new(pool: SqlitePool, token_config: TokenConfig) -> Self {
        let users = Arc::new(SqliteUserStore::new(pool.clone()));

        Self {
            authenticator: Authenticator::new(users),
            tokens: TokenIssuer::new(token_config),
            menu: SqliteMenuStore::new(pool.clone()),
            inquiries: SqliteInquiryStore::new(pool.clone()),
            testimonials: SqliteTestimonialStore::new(pool),
        }
    }
}
