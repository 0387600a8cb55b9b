//! Solution entity: a named bundle of parameters exported as one set

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "solutions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Stable external identifier
    #[sea_orm(unique)]
    pub uuid: Uuid,

    /// Solution name, globally unique
    #[sea_orm(unique)]
    pub name: String,

    pub description: Option<String>,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::solution_parameters::Entity")]
    SolutionParameters,

    #[sea_orm(has_many = "super::solution_api_keys::Entity")]
    ApiKeys,
}

impl Related<super::solution_parameters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SolutionParameters.def()
    }
}

impl Related<super::solution_api_keys::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApiKeys.def()
    }
}

impl Related<super::parameters::Entity> for Entity {
    fn to() -> RelationDef {
        super::solution_parameters::Relation::Parameter.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::solution_parameters::Relation::Solution.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
