//! Storage layer for the Solhub registry
//!
//! SeaORM entities for the six registry tables, the schema migration, and
//! repository implementations of the `solhub-interfaces` contracts.

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod testing;

pub use connection::{connect, DatabaseConfig, StorageError};
pub use migrations::Migrator;
pub use repositories::SeaOrmRepositoryFactory;
