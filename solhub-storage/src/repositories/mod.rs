//! SeaORM repository implementations

pub mod api_key_repository;
pub mod factory;
pub mod parameter_repository;
pub mod solution_repository;
pub mod tag_repository;

pub use api_key_repository::SeaOrmApiKeyRepository;
pub use factory::SeaOrmRepositoryFactory;
pub use parameter_repository::SeaOrmParameterRepository;
pub use solution_repository::SeaOrmSolutionRepository;
pub use tag_repository::SeaOrmTagRepository;

use sea_orm::DbErr;
use solhub_interfaces::DatabaseError;

/// Map a driver error to the internal variant
pub(crate) fn db_err(e: DbErr) -> DatabaseError {
    DatabaseError::Internal {
        message: e.to_string(),
    }
}

/// Map a driver error to `Conflict` when it is a uniqueness violation,
/// falling back to the internal variant otherwise. Used as a backstop
/// behind the explicit pre-checks so a concurrent insert still surfaces
/// as a conflict naming the field.
pub(crate) fn unique_violation(e: DbErr, conflict_message: &str) -> DatabaseError {
    if e.to_string().to_uppercase().contains("UNIQUE") {
        DatabaseError::Conflict {
            message: conflict_message.to_string(),
        }
    } else {
        db_err(e)
    }
}
