/// User model and database operations
///
/// A user is a single roster entry. The id is assigned by the database and
/// the email address is unique across all rows.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     first_name VARCHAR(100) NOT NULL,
///     last_name VARCHAR(100) NOT NULL,
///     email VARCHAR(120) NOT NULL UNIQUE,
///     age INTEGER NOT NULL,
///     city VARCHAR(100) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_shared::models::user::{NewUser, UpdateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     NewUser {
///         first_name: "Alice".to_string(),
///         last_name: "Smith".to_string(),
///         email: "alice@example.com".to_string(),
///         age: 30,
///         city: "Boston".to_string(),
///     },
/// )
/// .await?;
///
/// let moved = UpdateUser {
///     city: Some("Chicago".to_string()),
///     ..Default::default()
/// };
/// User::update(&pool, user.id, moved).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

/// Longest accepted first name, last name, or city
pub const NAME_MAX_LEN: u64 = 100;

/// Longest accepted email address
pub const EMAIL_MAX_LEN: u64 = 120;

/// Oldest accepted age
pub const AGE_MAX: i32 = 150;

/// Name of the unique constraint on `users.email`
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

const USER_COLUMNS: &str = "id, first_name, last_name, email, age, city, created_at, updated_at";

/// A roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Database-assigned id, never reused
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Unique across all users
    pub email: String,

    pub age: i32,

    pub city: String,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First and last name joined by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User {} {}>", self.first_name, self.last_name)
    }
}

/// Input for creating a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    pub city: String,
}

/// Input for updating a user
///
/// Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub city: Option<String>,
}

impl UpdateUser {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.city.is_none()
    }
}

impl From<NewUser> for UpdateUser {
    /// Replaces every field, as the edit form does
    fn from(user: NewUser) -> Self {
        Self {
            first_name: Some(user.first_name),
            last_name: Some(user.last_name),
            email: Some(user.email),
            age: Some(user.age),
            city: Some(user.city),
        }
    }
}

impl User {
    /// Inserts a new user and returns it with its generated id and timestamps
    ///
    /// # Errors
    ///
    /// Fails with a database error naming [`EMAIL_CONSTRAINT`] when the email
    /// is already taken.
    pub async fn create(pool: &PgPool, data: NewUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, email, age, city)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(data.first_name)
            .bind(data.last_name)
            .bind(data.email)
            .bind(data.age)
            .bind(data.city)
            .fetch_one(pool)
            .await
    }

    /// Finds a user by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a user by exact email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Updates the given fields and bumps `updated_at`
    ///
    /// Returns `None` when no user has this id.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        // $1 is always the id; each present field takes the next placeholder
        let mut query = String::from("UPDATE users SET updated_at = NOW()");
        let mut bind_count = 1;

        let columns = [
            ("first_name", data.first_name.is_some()),
            ("last_name", data.last_name.is_some()),
            ("email", data.email.is_some()),
            ("age", data.age.is_some()),
            ("city", data.city.is_some()),
        ];
        for (column, present) in columns {
            if present {
                bind_count += 1;
                query.push_str(&format!(", {column} = ${bind_count}"));
            }
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {USER_COLUMNS}"));

        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        if let Some(first_name) = data.first_name {
            q = q.bind(first_name);
        }
        if let Some(last_name) = data.last_name {
            q = q.bind(last_name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(age) = data.age {
            q = q.bind(age);
        }
        if let Some(city) = data.city {
            q = q.bind(city);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a user; returns false when the id did not exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists users ordered by id (oldest first)
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC LIMIT $1 OFFSET $2");

        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Counts all users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
