//! Test support: in-memory database factory
//!
//! The pool is pinned to a single connection because each SQLite
//! `:memory:` connection is its own database.

use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use crate::migrations::Migrator;
use crate::repositories::SeaOrmRepositoryFactory;

/// Fresh in-memory database with the schema applied
pub async fn in_memory_factory() -> SeaOrmRepositoryFactory {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("in-memory database should connect");
    Migrator::up(&db, None)
        .await
        .expect("migrations should apply cleanly");

    SeaOrmRepositoryFactory::new(db)
}
