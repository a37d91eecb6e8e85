//! Testimonial storage.
//!
//! Testimonials are moderated: they enter unapproved and only show up on
//! the public site once an admin flips `approved`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{StoreError, StoreResult};

/// A client testimonial
#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub author: String,
    pub quote: String,
    pub event_type: Option<String>,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Create payload for a testimonial
#[derive(Debug, Clone, Deserialize)]
pub struct NewTestimonial {
    pub author: String,
    pub quote: String,
    #[serde(default)]
    pub event_type: Option<String>,
}

#[derive(sqlx::FromRow)]
struct TestimonialRow {
    id: String,
    author: String,
    quote: String,
    event_type: Option<String>,
    approved: bool,
    created_at: DateTime<Utc>,
}

impl TestimonialRow {
    fn into_testimonial(self) -> StoreResult<Testimonial> {
        Ok(Testimonial {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| StoreError::Corrupt(format!("bad testimonial id: {e}")))?,
            author: self.author,
            quote: self.quote,
            event_type: self.event_type,
            approved: self.approved,
            created_at: self.created_at,
        })
    }
}

const TESTIMONIAL_COLUMNS: &str = "id, author, quote, event_type, approved, created_at";

/// Testimonial store over the shared sqlx pool
#[derive(Clone)]
pub struct SqliteTestimonialStore {
    pool: SqlitePool,
}

impl SqliteTestimonialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a testimonial; moderation starts with `approved = false`
    pub async fn create(&self, input: NewTestimonial) -> StoreResult<Testimonial> {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO testimonials (id, author, quote, event_type, approved, created_at) \
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(id.to_string())
        .bind(&input.author)
        .bind(&input.quote)
        .bind(&input.event_type)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<Testimonial> {
        let row: Option<TestimonialRow> = sqlx::query_as(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound)?.into_testimonial()
    }

    /// What the public site renders
    pub async fn list_approved(&self) -> StoreResult<Vec<Testimonial>> {
        let rows: Vec<TestimonialRow> = sqlx::query_as(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE approved = 1 \
             ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TestimonialRow::into_testimonial).collect()
    }

    /// The moderation queue, newest first
    pub async fn list_all(&self) -> StoreResult<Vec<Testimonial>> {
        let rows: Vec<TestimonialRow> = sqlx::query_as(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TestimonialRow::into_testimonial).collect()
    }

    pub async fn set_approved(&self, id: Uuid, approved: bool) -> StoreResult<Testimonial> {
        let result = sqlx::query("UPDATE testimonials SET approved = ? WHERE id = ?")
            .bind(approved)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    /// Count awaiting moderation, shown on the dashboard
    pub async fn count_pending(&self) -> StoreResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM testimonials WHERE approved = 0")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
