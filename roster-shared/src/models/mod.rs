/// Database models for Roster
///
/// # Models
///
/// - `user`: The roster entry (name, email, age, city)
///
/// # Example
///
/// ```no_run
/// use roster_shared::models::user::{NewUser, User};
/// use roster_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     NewUser {
///         first_name: "John".to_string(),
///         last_name: "Doe".to_string(),
///         email: "john.doe@example.com".to_string(),
///         age: 25,
///         city: "New York".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod user;
