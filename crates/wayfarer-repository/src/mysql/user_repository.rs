//! Identity store on MySQL.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use wayfarer_core::{Email, User, UserId, WayfarerError, WayfarerResult};

const SELECT_USER: &str = "SELECT id, email, password_hash, created_at FROM users";

/// `users` table access. The unique index on `email` turns a racing
/// duplicate signup into a `Conflict` (see `From<sqlx::Error>`).
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, column: &str, value: String) -> WayfarerResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE {column} = ?");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.inner())
            .await?
            .map(User::try_from)
            .transpose()
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = WayfarerError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| WayfarerError::Internal(format!("corrupt user id {:?}: {e}", row.id)))?;

        Ok(User {
            id: UserId::from_uuid(id),
            email: Email::new_unchecked(row.email),
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> WayfarerResult<Option<User>> {
        self.fetch_where("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &Email) -> WayfarerResult<Option<User>> {
        debug!(%email, "looking up account");
        self.fetch_where("email", email.as_str().to_owned()).await
    }

    async fn exists_by_email(&self, email: &Email) -> WayfarerResult<bool> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE email = ? LIMIT 1")
            .bind(email.as_str())
            .fetch_optional(self.pool.inner())
            .await?;
        Ok(found.is_some())
    }

    async fn save(&self, user: &User) -> WayfarerResult<User> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(self.pool.inner())
        .await?;

        debug!(user_id = %user.id, "account stored");
        Ok(user.clone())
    }
}
