//! Tag entity: a labeling facet over parameters

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,

    /// Tag name, globally unique
    #[sea_orm(unique)]
    pub name: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::parameter_tags::Entity")]
    ParameterTags,
}

impl Related<super::parameter_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParameterTags.def()
    }
}

impl Related<super::parameters::Entity> for Entity {
    fn to() -> RelationDef {
        super::parameter_tags::Relation::Parameter.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::parameter_tags::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
