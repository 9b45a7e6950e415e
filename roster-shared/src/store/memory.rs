/// In-memory user store
///
/// Mirrors the PostgreSQL backend closely enough for the web layer not to
/// notice the difference:
/// - ids start at 1 and are never reused, even after deletes
/// - email addresses are unique (exact match, like the SQL constraint)
/// - listings are ordered by id
///
/// Everything lives behind a single `tokio::sync::RwLock`, so each
/// operation is atomic with respect to the others.

use super::{StoreError, StoreResult, UserStore};
use crate::models::user::{NewUser, UpdateUser, User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// [`UserStore`] kept in process memory
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, data: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;

        if inner.email_taken(&data.email, None) {
            return Err(StoreError::DuplicateEmail(data.email));
        }

        inner.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.last_id,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            age: data.age,
            city: data.city,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());

        debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: i64, data: UpdateUser) -> StoreResult<Option<User>> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = &data.email {
            if inner.email_taken(email, Some(id)) {
                return Err(StoreError::DuplicateEmail(email.clone()));
            }
        }

        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(first_name) = data.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = data.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(age) = data.age {
            user.age = age;
        }
        if let Some(city) = data.city {
            user.city = city;
        }
        user.updated_at = Utc::now();

        debug!(user_id = id, "Updated user");
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let deleted = self.inner.write().await.users.remove(&id).is_some();
        debug!(user_id = id, deleted, "Deleted user");
        Ok(deleted)
    }

    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let offset = usize::try_from(offset).unwrap_or(0);

        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.inner.read().await.users.len() as i64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(first: &str, email: &str) -> NewUser {
        NewUser {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            age: 25,
            city: "New York".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryUserStore::new();

        let a = store.create(new_user("Alice", "alice@example.com")).await.unwrap();
        let b = store.create(new_user("Bob", "bob@example.com")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryUserStore::new();

        let a = store.create(new_user("Alice", "alice@example.com")).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());

        let b = store.create(new_user("Bob", "bob@example.com")).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();
        store.create(new_user("John", "john@example.com")).await.unwrap();

        let err = store
            .create(new_user("Johnny", "john@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail(ref e) if e == "john@example.com"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let store = MemoryUserStore::new();
        let created = store.create(new_user("John", "john@example.com")).await.unwrap();

        let found = store.find_by_email("john@example.com").await.unwrap();
        assert_eq!(found, Some(created));
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_applies_present_fields_only() {
        let store = MemoryUserStore::new();
        let created = store.create(new_user("John", "john@example.com")).await.unwrap();

        let updated = store
            .update(
                created.id,
                UpdateUser {
                    city: Some("Boston".to_string()),
                    age: Some(26),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.city, "Boston");
        assert_eq!(updated.age, 26);
        assert_eq!(updated.first_name, "John");
        assert_eq!(updated.email, "john@example.com");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let store = MemoryUserStore::new();
        let created = store.create(new_user("John", "john@example.com")).await.unwrap();

        let updated = store
            .update(
                created.id,
                UpdateUser {
                    email: Some("john@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_some());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_rejected() {
        let store = MemoryUserStore::new();
        store.create(new_user("Alice", "alice@example.com")).await.unwrap();
        let bob = store.create(new_user("Bob", "bob@example.com")).await.unwrap();

        let result = store
            .update(
                bob.id,
                UpdateUser {
                    email: Some("alice@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));
        let unchanged = store.find_by_id(bob.id).await.unwrap().unwrap();
        assert_eq!(unchanged.email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryUserStore::new();
        let result = store.update(9999, UpdateUser::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let store = MemoryUserStore::new();
        assert!(!store.delete(9999).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_and_pages() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            store
                .create(new_user(&format!("User{i}"), &format!("user{i}@example.com")))
                .await
                .unwrap();
        }

        let page: Vec<i64> = store
            .list(2, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(page, vec![3, 4]);

        assert!(store.list(10, 10).await.unwrap().is_empty());
        assert!(store.list(-1, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryUserStore::new();
        let handle = store.clone();

        store.create(new_user("John", "john@example.com")).await.unwrap();
        assert_eq!(handle.count().await.unwrap(), 1);
        assert_eq!(handle.backend(), "memory");
        assert!(handle.ping().await.is_ok());
    }
}
