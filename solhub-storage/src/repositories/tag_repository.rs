//! Tag repository implementation using SeaORM

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use solhub_api_types::{ApiId, UnifiedTag};
use solhub_interfaces::{DatabaseError, Repository, TagRepository};

use crate::entities::{tags, Tags};

use super::{db_err, unique_violation};

#[derive(Clone)]
pub struct SeaOrmTagRepository {
    db: DatabaseConnection,
}

impl SeaOrmTagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_unified(model: tags::Model) -> UnifiedTag {
        UnifiedTag {
            id: ApiId::from_i32(model.id),
            uuid: model.uuid,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl Repository for SeaOrmTagRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(db_err)
    }
}

#[async_trait]
impl TagRepository for SeaOrmTagRepository {
    async fn create(&self, name: &str) -> Result<UnifiedTag, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::Validation {
                message: "tag name must not be empty".to_string(),
            });
        }

        if Tags::find()
            .filter(tags::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some()
        {
            return Err(DatabaseError::conflict(format!(
                "tag name '{}' already exists",
                name
            )));
        }

        let conflict_message = format!("tag name '{}' already exists", name);
        let active = tags::ActiveModel {
            id: Default::default(),
            uuid: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
        };
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| unique_violation(e, &conflict_message))?;
        Ok(Self::to_unified(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedTag>, DatabaseError> {
        let model = Tags::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(model.map(Self::to_unified))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<UnifiedTag>, DatabaseError> {
        let model = Tags::find()
            .filter(tags::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(Self::to_unified))
    }

    async fn find_all(&self) -> Result<Vec<UnifiedTag>, DatabaseError> {
        let models = Tags::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(Self::to_unified).collect())
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        // Links to parameters are removed by ON DELETE CASCADE
        let result = Tags::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DatabaseError::not_found("tag", id));
        }
        Ok(())
    }
}
