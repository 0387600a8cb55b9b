//! Parameter entity: a shared key/value configuration entry
//!
//! Parameters are independently addressable; they may belong to any number
//! of solutions and carry any number of tags through the junction tables.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "parameters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,

    /// Optional display label
    pub name: Option<String>,

    /// Configuration key, globally unique
    #[sea_orm(unique)]
    pub key: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub value: Option<String>,

    pub description: Option<String>,

    /// Secret parameters are masked on the operator surface but exported in
    /// full on the key-gated path
    pub is_secret: bool,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::solution_parameters::Entity")]
    SolutionParameters,

    #[sea_orm(has_many = "super::parameter_tags::Entity")]
    ParameterTags,
}

impl Related<super::solution_parameters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SolutionParameters.def()
    }
}

impl Related<super::parameter_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParameterTags.def()
    }
}

impl Related<super::solutions::Entity> for Entity {
    fn to() -> RelationDef {
        super::solution_parameters::Relation::Solution.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::solution_parameters::Relation::Parameter.def().rev())
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::parameter_tags::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::parameter_tags::Relation::Parameter.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
