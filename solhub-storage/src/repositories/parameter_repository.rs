//! Parameter repository implementation using SeaORM
//!
//! Tag names supplied on create/update are created-or-linked inside the
//! same transaction as the parameter row, so a half-written tag set is
//! never observable.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_query::{Expr, OnConflict, Query};
use uuid::Uuid;

use solhub_api_types::{ApiId, ListResponse, PaginationInput, UnifiedParameter, UnifiedTag};
use solhub_interfaces::{
    DatabaseError, NewParameter, ParameterFilters, ParameterRepository, Repository,
    UpdateParameter,
};

use crate::entities::{
    parameter_tags, parameters, solution_parameters, tags, ParameterTags, Parameters,
    SolutionParameters, Tags,
};

use super::{db_err, unique_violation};

/// SeaORM implementation of the ParameterRepository
#[derive(Clone)]
pub struct SeaOrmParameterRepository {
    db: DatabaseConnection,
}

impl SeaOrmParameterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_unified(model: parameters::Model, tag_models: Vec<tags::Model>) -> UnifiedParameter {
        let mut tags: Vec<UnifiedTag> = tag_models
            .into_iter()
            .map(|t| UnifiedTag {
                id: ApiId::from_i32(t.id),
                uuid: t.uuid,
                name: t.name,
                created_at: t.created_at,
            })
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        UnifiedParameter {
            id: ApiId::from_i32(model.id),
            uuid: model.uuid,
            name: model.name,
            key: model.key,
            value: model.value,
            description: model.description,
            is_secret: model.is_secret,
            created_at: model.created_at,
            updated_at: model.updated_at,
            tags,
        }
    }

    /// Load tags for a batch of parameters and zip them into unified models
    async fn with_tags(
        &self,
        models: Vec<parameters::Model>,
    ) -> Result<Vec<UnifiedParameter>, DatabaseError> {
        let tag_sets = models
            .load_many_to_many(Tags, ParameterTags, &self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .zip(tag_sets)
            .map(|(m, t)| Self::to_unified(m, t))
            .collect())
    }

    async fn one_with_tags(
        &self,
        model: parameters::Model,
    ) -> Result<UnifiedParameter, DatabaseError> {
        let mut unified = self.with_tags(vec![model]).await?;
        unified
            .pop()
            .ok_or_else(|| DatabaseError::internal("parameter vanished during tag load"))
    }

    /// Create missing tags and link the parameter to each named tag. Runs
    /// inside the caller's transaction.
    async fn link_tags(
        txn: &DatabaseTransaction,
        parameter_id: i32,
        tag_names: &[String],
    ) -> Result<(), DatabaseError> {
        for name in tag_names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let tag = match Tags::find()
                .filter(tags::Column::Name.eq(name))
                .one(txn)
                .await
                .map_err(db_err)?
            {
                Some(tag) => tag,
                None => {
                    let active = tags::ActiveModel {
                        id: Default::default(),
                        uuid: Set(Uuid::new_v4()),
                        name: Set(name.to_string()),
                        created_at: Set(Utc::now()),
                    };
                    active.insert(txn).await.map_err(db_err)?
                }
            };

            let link = parameter_tags::ActiveModel {
                parameter_id: Set(parameter_id),
                tag_id: Set(tag.id),
            };
            ParameterTags::insert(link)
                .on_conflict(
                    OnConflict::columns([
                        parameter_tags::Column::ParameterId,
                        parameter_tags::Column::TagId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(txn)
                .await
                .map_err(db_err)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for SeaOrmParameterRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(db_err)
    }
}

#[async_trait]
impl ParameterRepository for SeaOrmParameterRepository {
    async fn create(&self, parameter: NewParameter) -> Result<UnifiedParameter, DatabaseError> {
        if Parameters::find()
            .filter(parameters::Column::Key.eq(&parameter.key))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some()
        {
            return Err(DatabaseError::conflict(format!(
                "parameter key '{}' already exists",
                parameter.key
            )));
        }

        let conflict_message = format!("parameter key '{}' already exists", parameter.key);
        let txn = self.db.begin().await.map_err(db_err)?;

        let now = Utc::now();
        let active = parameters::ActiveModel {
            id: Default::default(),
            uuid: Set(Uuid::new_v4()),
            name: Set(parameter.name),
            key: Set(parameter.key),
            value: Set(parameter.value),
            description: Set(parameter.description),
            is_secret: Set(parameter.is_secret),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active
            .insert(&txn)
            .await
            .map_err(|e| unique_violation(e, &conflict_message))?;

        Self::link_tags(&txn, model.id, &parameter.tags).await?;
        txn.commit().await.map_err(db_err)?;

        self.one_with_tags(model).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedParameter>, DatabaseError> {
        let model = Parameters::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        match model {
            Some(model) => Ok(Some(self.one_with_tags(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<UnifiedParameter>, DatabaseError> {
        let model = Parameters::find()
            .filter(parameters::Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(model) => Ok(Some(self.one_with_tags(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(
        &self,
        pagination: PaginationInput,
    ) -> Result<ListResponse<UnifiedParameter>, DatabaseError> {
        let total = Parameters::find().count(&self.db).await.map_err(db_err)?;

        let models = Parameters::find()
            .order_by_asc(parameters::Column::Key)
            .offset(u64::from(pagination.get_offset()))
            .limit(u64::from(pagination.get_limit()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = self.with_tags(models).await?;
        Ok(ListResponse::new(items, &pagination, total))
    }

    async fn update(
        &self,
        id: i32,
        update: UpdateParameter,
    ) -> Result<UnifiedParameter, DatabaseError> {
        let model = Parameters::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DatabaseError::not_found("parameter", id))?;

        if let Some(ref key) = update.key {
            let taken = Parameters::find()
                .filter(parameters::Column::Key.eq(key))
                .filter(parameters::Column::Id.ne(id))
                .one(&self.db)
                .await
                .map_err(db_err)?;
            if taken.is_some() {
                return Err(DatabaseError::conflict(format!(
                    "parameter key '{}' already exists",
                    key
                )));
            }
        }

        let conflict_message = format!(
            "parameter key '{}' already exists",
            update.key.as_deref().unwrap_or(&model.key)
        );
        let txn = self.db.begin().await.map_err(db_err)?;

        let mut active: parameters::ActiveModel = model.into();
        if let Some(name) = update.name {
            active.name = Set(Some(name));
        }
        if let Some(key) = update.key {
            active.key = Set(key);
        }
        if let Some(value) = update.value {
            active.value = Set(Some(value));
        }
        if let Some(description) = update.description {
            active.description = Set(Some(description));
        }
        if let Some(is_secret) = update.is_secret {
            active.is_secret = Set(is_secret);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&txn)
            .await
            .map_err(|e| unique_violation(e, &conflict_message))?;

        // Some(_) replaces the full tag set; None leaves tags untouched
        if let Some(ref tag_names) = update.tags {
            ParameterTags::delete_many()
                .filter(parameter_tags::Column::ParameterId.eq(id))
                .exec(&txn)
                .await
                .map_err(db_err)?;
            Self::link_tags(&txn, id, tag_names).await?;
        }

        txn.commit().await.map_err(db_err)?;
        self.one_with_tags(model).await
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        // Junction rows go with it via ON DELETE CASCADE
        let result = Parameters::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DatabaseError::not_found("parameter", id));
        }
        Ok(())
    }

    async fn search(
        &self,
        filters: ParameterFilters,
    ) -> Result<Vec<UnifiedParameter>, DatabaseError> {
        let mut query = Parameters::find();

        if let Some(ref solution_id) = filters.solution_id {
            let id = solution_id
                .as_i32()
                .ok_or_else(|| DatabaseError::Validation {
                    message: "invalid solution id".to_string(),
                })?;
            query = query.filter(
                parameters::Column::Id.in_subquery(
                    Query::select()
                        .column(solution_parameters::Column::ParameterId)
                        .from(SolutionParameters)
                        .and_where(Expr::col(solution_parameters::Column::SolutionId).eq(id))
                        .to_owned(),
                ),
            );
        }

        if let Some(ref tag_names) = filters.tags {
            if !tag_names.is_empty() {
                query = query.filter(
                    parameters::Column::Id.in_subquery(
                        Query::select()
                            .column(parameter_tags::Column::ParameterId)
                            .from(ParameterTags)
                            .and_where(
                                Expr::col(parameter_tags::Column::TagId).in_subquery(
                                    Query::select()
                                        .column(tags::Column::Id)
                                        .from(Tags)
                                        .and_where(
                                            Expr::col(tags::Column::Name)
                                                .is_in(tag_names.clone()),
                                        )
                                        .to_owned(),
                                ),
                            )
                            .to_owned(),
                    ),
                );
            }
        }

        if let Some(ref fragment) = filters.key_contains {
            query = query.filter(parameters::Column::Key.contains(fragment));
        }

        if let Some(is_secret) = filters.is_secret {
            query = query.filter(parameters::Column::IsSecret.eq(is_secret));
        }

        let models = query
            .order_by_asc(parameters::Column::Key)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.with_tags(models).await
    }

    async fn find_unassigned(&self) -> Result<Vec<UnifiedParameter>, DatabaseError> {
        let models = Parameters::find()
            .filter(
                parameters::Column::Id.not_in_subquery(
                    Query::select()
                        .column(solution_parameters::Column::ParameterId)
                        .from(SolutionParameters)
                        .to_owned(),
                ),
            )
            .order_by_asc(parameters::Column::Key)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.with_tags(models).await
    }

    async fn bulk_delete(&self, ids: &[i32]) -> Result<u64, DatabaseError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = Parameters::delete_many()
            .filter(parameters::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn bulk_tag(&self, ids: &[i32], tag_names: &[String]) -> Result<u64, DatabaseError> {
        if ids.is_empty() || tag_names.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await.map_err(db_err)?;

        // Ids with no row are skipped, the rest get every named tag
        let existing: Vec<i32> = Parameters::find()
            .filter(parameters::Column::Id.is_in(ids.iter().copied()))
            .select_only()
            .column(parameters::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err)?;

        for id in &existing {
            Self::link_tags(&txn, *id, tag_names).await?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(existing.len() as u64)
    }

    async fn bulk_untag(&self, ids: &[i32], tag_names: &[String]) -> Result<u64, DatabaseError> {
        if ids.is_empty() || tag_names.is_empty() {
            return Ok(0);
        }

        let result = ParameterTags::delete_many()
            .filter(parameter_tags::Column::ParameterId.is_in(ids.iter().copied()))
            .filter(
                parameter_tags::Column::TagId.in_subquery(
                    Query::select()
                        .column(tags::Column::Id)
                        .from(Tags)
                        .and_where(Expr::col(tags::Column::Name).is_in(tag_names.to_vec()))
                        .to_owned(),
                ),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
