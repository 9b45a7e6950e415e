/// Configuration management for the web server
///
/// Configuration is read from environment variables; a `.env` file in the
/// working directory is loaded first when present.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string, or `memory://` (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `RUN_MIGRATIONS`: Apply migrations at startup (default: true)
/// - `APP_HOST`: Host to bind to (default: 0.0.0.0)
/// - `APP_PORT`: Port to bind to (default: 8080)
/// - `APP_PAGE_SIZE`: Users per page on the home page (default: 25)
/// - `APP_PRODUCTION`: Enables HSTS (default: false)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use roster_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// `DATABASE_URL` value selecting the in-memory store
pub const MEMORY_DATABASE_URL: &str = "memory://";

/// Largest accepted `APP_PAGE_SIZE`
pub const MAX_PAGE_SIZE: u32 = 500;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Users shown per page on the home page
    pub page_size: u32,

    /// Production mode (HTTPS assumed, HSTS sent)
    pub production: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL or [`MEMORY_DATABASE_URL`]
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

/// Where users are stored, derived from the database URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                page_size: 25,
                production: false,
            },
            database: DatabaseSettings {
                url: MEMORY_DATABASE_URL.to_string(),
                max_connections: 10,
                run_migrations: true,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable has an
    /// invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let page_size = parse_or(&lookup, "APP_PAGE_SIZE", defaults.server.page_size)?;
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            anyhow::bail!("APP_PAGE_SIZE must be between 1 and {}", MAX_PAGE_SIZE);
        }

        Ok(Self {
            server: ServerConfig {
                host: lookup("APP_HOST").unwrap_or(defaults.server.host),
                port: parse_or(&lookup, "APP_PORT", defaults.server.port)?,
                page_size,
                production: parse_bool_or(&lookup, "APP_PRODUCTION", defaults.server.production)?,
            },
            database: DatabaseSettings {
                url: database_url,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    defaults.database.max_connections,
                )?,
                run_migrations: parse_bool_or(
                    &lookup,
                    "RUN_MIGRATIONS",
                    defaults.database.run_migrations,
                )?,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Storage backend selected by `DATABASE_URL`
    pub fn storage(&self) -> StorageBackend {
        if self.database.url == MEMORY_DATABASE_URL {
            StorageBackend::Memory
        } else {
            StorageBackend::Postgres(self.database.url.clone())
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has invalid value {:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{} must be a boolean, got {:?}", key, v),
        },
    }
}
