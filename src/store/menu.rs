//! Menu storage.
//!
//! Menu items live in a single table; the `dietary_tags` column holds a
//! JSON-encoded string array, decoded at the store boundary so handlers
//! only ever see `Vec<String>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{StoreError, StoreResult};

/// A dish or package offered by the studio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub dietary_tags: Vec<String>,
    pub available: bool,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a menu item
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemInput {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub position: i64,
}

fn default_available() -> bool {
    true
}

#[derive(sqlx::FromRow)]
struct MenuRow {
    id: String,
    name: String,
    description: String,
    category: String,
    price_cents: i64,
    dietary_tags: String,
    available: bool,
    position: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MenuRow {
    fn into_item(self) -> StoreResult<MenuItem> {
        Ok(MenuItem {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| StoreError::Corrupt(format!("bad menu item id: {e}")))?,
            dietary_tags: serde_json::from_str(&self.dietary_tags)
                .map_err(|e| StoreError::Corrupt(format!("bad dietary_tags: {e}")))?,
            name: self.name,
            description: self.description,
            category: self.category,
            price_cents: self.price_cents,
            available: self.available,
            position: self.position,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const MENU_COLUMNS: &str = "id, name, description, category, price_cents, dietary_tags, \
                            available, position, created_at, updated_at";

/// Menu store over the shared sqlx pool
#[derive(Clone)]
pub struct SqliteMenuStore {
    pool: SqlitePool,
}

impl SqliteMenuStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Items shown on the public site, grouped the way the menu renders
    pub async fn list_available(&self) -> StoreResult<Vec<MenuItem>> {
        let rows: Vec<MenuRow> = sqlx::query_as(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE available = 1 \
             ORDER BY category, position, name"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MenuRow::into_item).collect()
    }

    /// Every item, including ones hidden from the public menu
    pub async fn list_all(&self) -> StoreResult<Vec<MenuItem>> {
        let rows: Vec<MenuRow> = sqlx::query_as(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items ORDER BY category, position, name"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MenuRow::into_item).collect()
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<MenuItem> {
        let row: Option<MenuRow> = sqlx::query_as(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound)?.into_item()
    }

    pub async fn create(&self, input: MenuItemInput) -> StoreResult<MenuItem> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let tags = serde_json::to_string(&input.dietary_tags)
            .map_err(|e| StoreError::Corrupt(format!("bad dietary_tags: {e}")))?;

        sqlx::query(
            "INSERT INTO menu_items \
             (id, name, description, category, price_cents, dietary_tags, available, position, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.price_cents)
        .bind(&tags)
        .bind(input.available)
        .bind(input.position)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    pub async fn update(&self, id: Uuid, input: MenuItemInput) -> StoreResult<MenuItem> {
        let tags = serde_json::to_string(&input.dietary_tags)
            .map_err(|e| StoreError::Corrupt(format!("bad dietary_tags: {e}")))?;

        let result = sqlx::query(
            "UPDATE menu_items SET name = ?, description = ?, category = ?, price_cents = ?, \
             dietary_tags = ?, available = ?, position = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.price_cents)
        .bind(&tags)
        .bind(input.available)
        .bind(input.position)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
