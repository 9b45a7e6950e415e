/// Schema migrations
///
/// Migration files live in `roster-shared/migrations/` and are embedded into
/// the binary at compile time with `sqlx::migrate!`, so a deployed server
/// needs no files on disk to bring its schema up to date.
///
/// # Example
///
/// ```no_run
/// use roster_shared::db::migrations::{ensure_database_exists, run_migrations};
/// use roster_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = std::env::var("DATABASE_URL")?;
/// ensure_database_exists(&url).await?;
///
/// let pool = create_pool(DatabaseConfig { url, ..Default::default() }).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::MigrateDatabase, migrate::Migrator, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applied-migration summary read from `_sqlx_migrations`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Number of successfully applied migrations
    pub applied_migrations: usize,

    /// Highest applied version
    pub latest_version: Option<i64>,

    /// True when every embedded migration has been applied
    pub is_up_to_date: bool,
}

/// Applies every pending embedded migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(
        embedded = MIGRATOR.iter().count(),
        "Starting database migrations"
    );

    if let Err(e) = MIGRATOR.run(pool).await {
        warn!(error = %e, "Migration failed");
        return Err(e);
    }

    info!("Database migrations complete");
    Ok(())
}

/// Reports which migrations the database has applied
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    debug!("Checking migration status");

    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
            is_up_to_date: MIGRATOR.iter().next().is_none(),
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = true",
    )
    .fetch_one(pool)
    .await?;

    let expected = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .count();

    debug!(
        applied_migrations = count,
        expected,
        latest_version = ?latest_version,
        "Migration status retrieved"
    );

    Ok(MigrationStatus {
        applied_migrations: count as usize,
        latest_version,
        is_up_to_date: count as usize >= expected,
    })
}

/// Creates the database named in `database_url` if it is missing
///
/// Intended for development and test setups; production databases are
/// provisioned ahead of time.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already exists");
        return Ok(());
    }

    info!("Database does not exist, creating it");
    Postgres::create_database(database_url).await?;
    Ok(())
}
