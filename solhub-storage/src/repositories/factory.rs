//! Repository factory wiring the SeaORM implementations together

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use solhub_interfaces::{
    ApiKeyRepository, DatabaseError, ParameterRepository, RepositoryFactory, SolutionRepository,
    TagRepository,
};

use super::{
    SeaOrmApiKeyRepository, SeaOrmParameterRepository, SeaOrmSolutionRepository,
    SeaOrmTagRepository,
};

/// Holds one repository instance per entity, all sharing a connection pool
#[derive(Clone)]
pub struct SeaOrmRepositoryFactory {
    db: DatabaseConnection,
    solutions: SeaOrmSolutionRepository,
    parameters: SeaOrmParameterRepository,
    tags: SeaOrmTagRepository,
    api_keys: SeaOrmApiKeyRepository,
}

impl SeaOrmRepositoryFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            solutions: SeaOrmSolutionRepository::new(db.clone()),
            parameters: SeaOrmParameterRepository::new(db.clone()),
            tags: SeaOrmTagRepository::new(db.clone()),
            api_keys: SeaOrmApiKeyRepository::new(db.clone()),
            db,
        }
    }

    /// Direct access to the underlying connection, for migrations and tests
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RepositoryFactory for SeaOrmRepositoryFactory {
    fn solution_repository(&self) -> &dyn SolutionRepository {
        &self.solutions
    }

    fn parameter_repository(&self) -> &dyn ParameterRepository {
        &self.parameters
    }

    fn tag_repository(&self) -> &dyn TagRepository {
        &self.tags
    }

    fn api_key_repository(&self) -> &dyn ApiKeyRepository {
        &self.api_keys
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db
            .ping()
            .await
            .map_err(|e| DatabaseError::Connection {
                message: e.to_string(),
            })
    }
}
