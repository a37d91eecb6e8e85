//! Event-inquiry storage.
//!
//! Inquiries arrive through the public form and are triaged from the
//! admin panel by moving them through `new` → `replied` → `closed`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{StoreError, StoreResult};

/// Triage state of an inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Replied,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Replied => "replied",
            InquiryStatus::Closed => "closed",
        }
    }
}

impl FromStr for InquiryStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(InquiryStatus::New),
            "replied" => Ok(InquiryStatus::Replied),
            "closed" => Ok(InquiryStatus::Closed),
            other => Err(StoreError::Corrupt(format!("unknown inquiry status: {other}"))),
        }
    }
}

/// A submitted event inquiry
#[derive(Debug, Clone, Serialize)]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_date: Option<String>,
    pub guest_count: Option<i64>,
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

/// Public form payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub guest_count: Option<i64>,
    pub message: String,
}

#[derive(sqlx::FromRow)]
struct InquiryRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    event_date: Option<String>,
    guest_count: Option<i64>,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl InquiryRow {
    fn into_inquiry(self) -> StoreResult<Inquiry> {
        Ok(Inquiry {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| StoreError::Corrupt(format!("bad inquiry id: {e}")))?,
            status: self.status.parse()?,
            name: self.name,
            email: self.email,
            phone: self.phone,
            event_date: self.event_date,
            guest_count: self.guest_count,
            message: self.message,
            created_at: self.created_at,
        })
    }
}

const INQUIRY_COLUMNS: &str =
    "id, name, email, phone, event_date, guest_count, message, status, created_at";

/// Inquiry store over the shared sqlx pool
#[derive(Clone)]
pub struct SqliteInquiryStore {
    pool: SqlitePool,
}

impl SqliteInquiryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a new inquiry; every inquiry starts out as `new`
    pub async fn submit(&self, input: NewInquiry) -> StoreResult<Inquiry> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO inquiries \
             (id, name, email, phone, event_date, guest_count, message, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.event_date)
        .bind(input.guest_count)
        .bind(&input.message)
        .bind(InquiryStatus::New.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<Inquiry> {
        let row: Option<InquiryRow> = sqlx::query_as(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound)?.into_inquiry()
    }

    /// Newest first, optionally narrowed to one status
    pub async fn list(&self, status: Option<InquiryStatus>) -> StoreResult<Vec<Inquiry>> {
        let rows: Vec<InquiryRow> = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE status = ? \
                     ORDER BY created_at DESC"
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {INQUIRY_COLUMNS} FROM inquiries ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(InquiryRow::into_inquiry).collect()
    }

    pub async fn set_status(&self, id: Uuid, status: InquiryStatus) -> StoreResult<Inquiry> {
        let result = sqlx::query("UPDATE inquiries SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    /// Count of untriaged inquiries, shown on the dashboard
    pub async fn count_new(&self) -> StoreResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM inquiries WHERE status = 'new'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
