//! PostgreSQL-backed user store

use super::{StoreError, StoreResult, UserStore};
use crate::db::pool;
use crate::models::user::{NewUser, UpdateUser, User, EMAIL_CONSTRAINT};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// [`UserStore`] over a PostgreSQL pool
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps a unique violation on the email constraint to `DuplicateEmail`
fn map_write_error(err: sqlx::Error, email: Option<&str>) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
            return StoreError::DuplicateEmail(email.unwrap_or_default().to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, data: NewUser) -> StoreResult<User> {
        let email = data.email.clone();
        let user = User::create(&self.pool, data)
            .await
            .map_err(|e| map_write_error(e, Some(&email)))?;

        debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn update(&self, id: i64, data: UpdateUser) -> StoreResult<Option<User>> {
        let email = data.email.clone();
        let user = User::update(&self.pool, id, data)
            .await
            .map_err(|e| map_write_error(e, email.as_deref()))?;

        debug!(user_id = id, found = user.is_some(), "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let deleted = User::delete(&self.pool, id).await?;
        debug!(user_id = id, deleted, "Deleted user");
        Ok(deleted)
    }

    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool, limit, offset).await?)
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(User::count(&self.pool).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }
}
