//! SQLite-backed credential store.
//!
//! Implements the [`UserStore`] seam over the `users` table. Email
//! lookups are exact: SQLite compares TEXT case-sensitively by default,
//! which is what the login path expects.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::errors::{AuthError, AuthResult};
use crate::auth::user::{UserRecord, UserStore};

/// User store over the shared sqlx pool
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> AuthResult<UserRecord> {
        Ok(UserRecord {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| AuthError::StorageError(format!("bad user id: {e}")))?,
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            role: self.role.parse()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, name, role, created_at, updated_at";

#[async_trait::async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::StorageError(e.to_string()))?;

        row.map(UserRow::into_record).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::StorageError(e.to_string()))?;

        row.map(UserRow::into_record).transpose()
    }

    async fn create(&self, user: &UserRecord) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::StorageError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user::Role;
    use crate::store::connect;

    async fn store() -> SqliteUserStore {
        let pool = connect("sqlite::memory:").await.unwrap();
        SqliteUserStore::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = store().await;
        let user = UserRecord::new(
            "admin@example.com".to_string(),
            "password123",
            Some("Admin".to_string()),
            Role::Admin,
        )
        .unwrap();

        store.create(&user).await.unwrap();

        let found = store
            .find_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, Role::Admin);
        assert_eq!(found.name.as_deref(), Some("Admin"));
        assert!(found.verify_password("password123").unwrap());

        let by_id = store.find_by_id(user.id).await.unwrap();
        assert!(by_id.is_some());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let store = store().await;
        let user =
            UserRecord::new("admin@example.com".to_string(), "password123", None, Role::Admin)
                .unwrap();
        store.create(&user).await.unwrap();

        let miss = store.find_by_email("ADMIN@example.com").await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = store().await;
        let first =
            UserRecord::new("admin@example.com".to_string(), "password123", None, Role::Admin)
                .unwrap();
        let second =
            UserRecord::new("admin@example.com".to_string(), "different", None, Role::Staff)
                .unwrap();

        store.create(&first).await.unwrap();
        let result = store.create(&second).await;
        assert!(matches!(result, Err(AuthError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_unknown_role_in_storage_is_an_error() {
        let store = store().await;
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, role, created_at, updated_at)
             VALUES (?, ?, ?, NULL, 'owner', ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind("odd@example.com")
        .bind("x")
        .bind(Utc::now())
        .bind(Utc::now())
        .execute(&store.pool)
        .await
        .unwrap();

        let result = store.find_by_email("odd@example.com").await;
        assert!(matches!(result, Err(AuthError::StorageError(_))));
    }
}
