//! API key repository implementation using SeaORM
//!
//! Keys are looked up by the SHA-256 digest of the presented token. The
//! raw token never reaches this layer.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use sea_query::Expr;
use uuid::Uuid;

use solhub_api_types::{ApiId, UnifiedApiKey};
use solhub_interfaces::{ApiKeyRepository, DatabaseError, NewApiKey, Repository};

use crate::entities::{solution_api_keys, solutions, SolutionApiKeys, Solutions};

use super::db_err;

#[derive(Clone)]
pub struct SeaOrmApiKeyRepository {
    db: DatabaseConnection,
}

impl SeaOrmApiKeyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_unified(model: solution_api_keys::Model) -> UnifiedApiKey {
        UnifiedApiKey {
            id: ApiId::from_i32(model.id),
            uuid: model.uuid,
            solution_id: ApiId::from_i32(model.solution_id),
            key_name: model.key_name,
            key_prefix: model.key_prefix,
            is_active: model.is_active,
            created_at: model.created_at,
            last_used: model.last_used,
            expires_at: model.expires_at,
        }
    }
}

#[async_trait]
impl Repository for SeaOrmApiKeyRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(db_err)
    }
}

#[async_trait]
impl ApiKeyRepository for SeaOrmApiKeyRepository {
    async fn create_api_key(&self, key: NewApiKey) -> Result<UnifiedApiKey, DatabaseError> {
        if Solutions::find_by_id(key.solution_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DatabaseError::not_found("solution", key.solution_id));
        }

        let active = solution_api_keys::ActiveModel {
            id: Default::default(),
            uuid: Set(Uuid::new_v4()),
            solution_id: Set(key.solution_id),
            key_name: Set(key.key_name),
            key_hash: Set(key.key_hash),
            key_prefix: Set(key.key_prefix),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            last_used: Set(None),
            expires_at: Set(key.expires_at),
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(Self::to_unified(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedApiKey>, DatabaseError> {
        let model = SolutionApiKeys::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(model.map(Self::to_unified))
    }

    async fn find_valid_by_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<UnifiedApiKey>, DatabaseError> {
        let model = SolutionApiKeys::find()
            .filter(solution_api_keys::Column::KeyHash.eq(key_hash))
            .filter(solution_api_keys::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        // Expiry is checked lazily here rather than swept in the background
        let now = Utc::now();
        Ok(model.map(Self::to_unified).filter(|key| key.is_valid(now)))
    }

    async fn find_by_solution(
        &self,
        solution_id: i32,
    ) -> Result<Vec<UnifiedApiKey>, DatabaseError> {
        if Solutions::find()
            .filter(solutions::Column::Id.eq(solution_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DatabaseError::not_found("solution", solution_id));
        }

        let models = SolutionApiKeys::find()
            .filter(solution_api_keys::Column::SolutionId.eq(solution_id))
            .order_by_desc(solution_api_keys::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(Self::to_unified).collect())
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<(), DatabaseError> {
        let model = SolutionApiKeys::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DatabaseError::not_found("api key", id))?;

        let mut active: solution_api_keys::ActiveModel = model.into();
        active.is_active = Set(is_active);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let result = SolutionApiKeys::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DatabaseError::not_found("api key", id));
        }
        Ok(())
    }

    async fn touch_last_used(&self, id: i32) -> Result<(), DatabaseError> {
        // Last-write-wins is acceptable; callers spawn this off the hot path
        SolutionApiKeys::update_many()
            .col_expr(solution_api_keys::Column::LastUsed, Expr::value(Utc::now()))
            .filter(solution_api_keys::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
