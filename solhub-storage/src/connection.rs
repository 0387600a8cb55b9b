//! Database connection setup

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite://solhub.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    #[serde(with = "humantime_secs")]
    pub connection_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://solhub.db".to_string(),
            max_connections: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

/// Storage-level errors raised while establishing a connection
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Connect to the database and run pending migrations
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, StorageError> {
    info!("Connecting to database: {}", config.url);

    ensure_sqlite_file_exists(&config.url)?;

    let mut opts = ConnectOptions::new(&config.url);
    opts.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(config.connection_timeout)
        .acquire_timeout(config.connection_timeout)
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let connection = Database::connect(opts).await?;

    crate::migrations::Migrator::up(&connection, None).await?;

    debug!(
        "Database connection established with {} max connections",
        config.max_connections
    );

    Ok(connection)
}

/// Ensure the parent directory exists for file-based SQLite databases
fn ensure_sqlite_file_exists(database_url: &str) -> Result<(), StorageError> {
    if database_url.starts_with("sqlite:") && !database_url.contains(":memory:") {
        let file_path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .ok_or_else(|| {
                StorageError::Config(format!("Invalid SQLite URL format: {}", database_url))
            })?;
        let file_path = file_path.split('?').next().unwrap_or(file_path);

        let path = std::path::Path::new(file_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Config(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        if !path.exists() {
            std::fs::File::create(path).map_err(|e| {
                StorageError::Config(format!(
                    "Failed to create database file {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

mod humantime_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_secs().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
