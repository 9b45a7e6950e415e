/// User storage abstraction
///
/// Handlers talk to a [`UserStore`] rather than to a pool directly, so the
/// same router runs against PostgreSQL in production and against the
/// in-memory store in tests and local development.
///
/// # Backends
///
/// - [`PgUserStore`]: PostgreSQL through the `User` model queries
/// - [`MemoryUserStore`]: process-local map with the same semantics
///
/// # Example
///
/// ```
/// use roster_shared::models::user::NewUser;
/// use roster_shared::store::{MemoryUserStore, UserStore};
///
/// # async fn example() -> Result<(), roster_shared::store::StoreError> {
/// let store = MemoryUserStore::new();
/// let user = store
///     .create(NewUser {
///         first_name: "John".to_string(),
///         last_name: "Doe".to_string(),
///         email: "john.doe@example.com".to_string(),
///         age: 25,
///         city: "New York".to_string(),
///     })
///     .await?;
/// assert_eq!(store.count().await?, 1);
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use crate::models::user::{NewUser, UpdateUser, User};
use async_trait::async_trait;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another user already has this email address
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Backend failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD operations over users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Inserts a user, assigning a fresh id
    async fn create(&self, data: NewUser) -> StoreResult<User>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Applies the present fields; `None` if the id is unknown
    async fn update(&self, id: i64, data: UpdateUser) -> StoreResult<Option<User>>;

    /// Returns whether a user was removed
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Users ordered by id ascending
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>>;

    async fn count(&self) -> StoreResult<i64>;

    /// Checks that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}
