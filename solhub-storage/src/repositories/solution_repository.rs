//! Solution repository implementation using SeaORM
//!
//! Owns the solution side of the relationship manager: idempotent
//! assign/unassign and the transactional delete guard.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_query::OnConflict;
use uuid::Uuid;

use solhub_api_types::{ApiId, ListResponse, PaginationInput, UnifiedSolution};
use solhub_interfaces::{
    DatabaseError, NewSolution, Repository, SolutionRepository, UpdateSolution,
};

use crate::entities::{
    solution_parameters, solutions, Parameters, SolutionParameters, Solutions,
};

use super::{db_err, unique_violation};

/// SeaORM implementation of the SolutionRepository
#[derive(Clone)]
pub struct SeaOrmSolutionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSolutionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_unified(model: solutions::Model, parameter_count: u64) -> UnifiedSolution {
        UnifiedSolution {
            id: ApiId::from_i32(model.id),
            uuid: model.uuid,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
            parameter_count,
        }
    }

    async fn count_for(&self, id: i32) -> Result<u64, DatabaseError> {
        SolutionParameters::find()
            .filter(solution_parameters::Column::SolutionId.eq(id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl Repository for SeaOrmSolutionRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(db_err)
    }
}

#[async_trait]
impl SolutionRepository for SeaOrmSolutionRepository {
    async fn create(&self, solution: NewSolution) -> Result<UnifiedSolution, DatabaseError> {
        if Solutions::find()
            .filter(solutions::Column::Name.eq(&solution.name))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some()
        {
            return Err(DatabaseError::conflict(format!(
                "solution name '{}' already exists",
                solution.name
            )));
        }

        let now = Utc::now();
        let conflict_message = format!("solution name '{}' already exists", solution.name);
        let active = solutions::ActiveModel {
            id: Default::default(),
            uuid: Set(Uuid::new_v4()),
            name: Set(solution.name),
            description: Set(solution.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| unique_violation(e, &conflict_message))?;

        Ok(Self::to_unified(model, 0))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedSolution>, DatabaseError> {
        let model = Solutions::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        match model {
            Some(model) => {
                let count = self.count_for(model.id).await?;
                Ok(Some(Self::to_unified(model, count)))
            }
            None => Ok(None),
        }
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<UnifiedSolution>, DatabaseError> {
        let model = Solutions::find()
            .filter(solutions::Column::Uuid.eq(uuid))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(model) => {
                let count = self.count_for(model.id).await?;
                Ok(Some(Self::to_unified(model, count)))
            }
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<UnifiedSolution>, DatabaseError> {
        let model = Solutions::find()
            .filter(solutions::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(model) => {
                let count = self.count_for(model.id).await?;
                Ok(Some(Self::to_unified(model, count)))
            }
            None => Ok(None),
        }
    }

    async fn find_all(
        &self,
        pagination: PaginationInput,
    ) -> Result<ListResponse<UnifiedSolution>, DatabaseError> {
        let total = Solutions::find().count(&self.db).await.map_err(db_err)?;

        let models = Solutions::find()
            .order_by_asc(solutions::Column::Name)
            .offset(u64::from(pagination.get_offset()))
            .limit(u64::from(pagination.get_limit()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        // One grouped query for the page's parameter counts
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut counts: HashMap<i32, u64> = HashMap::new();
        if !ids.is_empty() {
            let rows: Vec<(i32, i64)> = SolutionParameters::find()
                .select_only()
                .column(solution_parameters::Column::SolutionId)
                .column_as(solution_parameters::Column::ParameterId.count(), "count")
                .filter(solution_parameters::Column::SolutionId.is_in(ids))
                .group_by(solution_parameters::Column::SolutionId)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(db_err)?;
            counts = rows.into_iter().map(|(id, n)| (id, n as u64)).collect();
        }

        let items = models
            .into_iter()
            .map(|m| {
                let count = counts.get(&m.id).copied().unwrap_or(0);
                Self::to_unified(m, count)
            })
            .collect();

        Ok(ListResponse::new(items, &pagination, total))
    }

    async fn update(
        &self,
        id: i32,
        update: UpdateSolution,
    ) -> Result<UnifiedSolution, DatabaseError> {
        let model = Solutions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DatabaseError::not_found("solution", id))?;

        if let Some(ref name) = update.name {
            let taken = Solutions::find()
                .filter(solutions::Column::Name.eq(name))
                .filter(solutions::Column::Id.ne(id))
                .one(&self.db)
                .await
                .map_err(db_err)?;
            if taken.is_some() {
                return Err(DatabaseError::conflict(format!(
                    "solution name '{}' already exists",
                    name
                )));
            }
        }

        let conflict_message = format!(
            "solution name '{}' already exists",
            update.name.as_deref().unwrap_or(&model.name)
        );
        let mut active: solutions::ActiveModel = model.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(description) = update.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| unique_violation(e, &conflict_message))?;
        let count = self.count_for(model.id).await?;
        Ok(Self::to_unified(model, count))
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        // Count and delete inside one transaction so a concurrent assignment
        // cannot slip in between the check and the delete.
        let txn = self.db.begin().await.map_err(db_err)?;

        let exists = Solutions::find_by_id(id).one(&txn).await.map_err(db_err)?;
        if exists.is_none() {
            txn.rollback().await.map_err(db_err)?;
            return Err(DatabaseError::not_found("solution", id));
        }

        let assigned = SolutionParameters::find()
            .filter(solution_parameters::Column::SolutionId.eq(id))
            .count(&txn)
            .await
            .map_err(db_err)?;
        if assigned > 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DatabaseError::conflict(format!(
                "solution has {} assigned parameter(s); unassign them before deleting",
                assigned
            )));
        }

        Solutions::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn parameter_count(&self, id: i32) -> Result<u64, DatabaseError> {
        self.count_for(id).await
    }

    async fn assign_parameter(
        &self,
        solution_id: i32,
        parameter_id: i32,
    ) -> Result<(), DatabaseError> {
        if Solutions::find_by_id(solution_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DatabaseError::not_found("solution", solution_id));
        }
        if Parameters::find_by_id(parameter_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DatabaseError::not_found("parameter", parameter_id));
        }

        // Idempotent: an existing pair is a no-op success
        let active = solution_parameters::ActiveModel {
            solution_id: Set(solution_id),
            parameter_id: Set(parameter_id),
        };
        SolutionParameters::insert(active)
            .on_conflict(
                OnConflict::columns([
                    solution_parameters::Column::SolutionId,
                    solution_parameters::Column::ParameterId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn unassign_parameter(
        &self,
        solution_id: i32,
        parameter_id: i32,
    ) -> Result<(), DatabaseError> {
        // Idempotent: deleting an absent pair is a no-op success
        SolutionParameters::delete_many()
            .filter(solution_parameters::Column::SolutionId.eq(solution_id))
            .filter(solution_parameters::Column::ParameterId.eq(parameter_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
