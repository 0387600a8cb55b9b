//! Solution/parameter junction
//!
//! A row means "this parameter is exposed when this solution is exported".
//! Cascade-deletes with either parent, except that solution deletion is
//! intercepted by the delete guard while rows remain.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "solution_parameters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub solution_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub parameter_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::solutions::Entity",
        from = "Column::SolutionId",
        to = "super::solutions::Column::Id",
        on_delete = "Cascade"
    )]
    Solution,

    #[sea_orm(
        belongs_to = "super::parameters::Entity",
        from = "Column::ParameterId",
        to = "super::parameters::Column::Id",
        on_delete = "Cascade"
    )]
    Parameter,
}

impl Related<super::solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Solution.def()
    }
}

impl Related<super::parameters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parameter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
