//! # Relational Store
//!
//! SQLite-backed persistence for users and site content, accessed through
//! an sqlx connection pool.
//!
//! The pool is created once at process start and handed to the stores
//! explicitly; nothing in the crate reaches for a global handle. Schema
//! creation is idempotent and runs on connect.

pub mod inquiries;
pub mod menu;
pub mod testimonials;
pub mod users;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use thiserror::Error;

pub use inquiries::{Inquiry, InquiryStatus, NewInquiry, SqliteInquiryStore};
pub use menu::{MenuItem, MenuItemInput, SqliteMenuStore};
pub use testimonials::{NewTestimonial, SqliteTestimonialStore, Testimonial};
pub use users::SqliteUserStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the content stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row for the given id
    #[error("record not found")]
    NotFound,

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored column value did not decode (bad id, bad JSON, bad enum)
    #[error("corrupt column value: {0}")]
    Corrupt(String),
}

/// Open the database and make sure the schema exists
///
/// A single connection is used: SQLite serializes writers anyway, and it
/// keeps `sqlite::memory:` (one database per connection) behaving the
/// same in tests as a file-backed database does in production.
pub async fn connect(database_url: &str) -> StoreResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Create all tables if they are not present
pub async fn init_schema(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name TEXT,
            role TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS menu_items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            price_cents INTEGER NOT NULL,
            dietary_tags TEXT NOT NULL DEFAULT '[]',
            available INTEGER NOT NULL DEFAULT 1,
            position INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS inquiries (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            event_date TEXT,
            guest_count INTEGER,
            message TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'new',
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS testimonials (
            id TEXT PRIMARY KEY,
            author TEXT NOT NULL,
            quote TEXT NOT NULL,
            event_type TEXT,
            approved INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_creates_schema() {
        let pool = connect("sqlite::memory:").await.unwrap();

        // Re-running schema creation must be a no-op
        init_schema(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert!(names.contains(&"users"));
        assert!(names.contains(&"menu_items"));
        assert!(names.contains(&"inquiries"));
        assert!(names.contains(&"testimonials"));
    }
}
