//! Per-solution API key entity for the public export endpoint
//!
//! Only the SHA-256 digest of the token is stored; the raw value is shown
//! once at creation and is not recoverable afterwards. The prefix is kept
//! for identification in listings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "solution_api_keys")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,

    /// Solution this key is scoped to
    pub solution_id: i32,

    /// Human-readable label
    pub key_name: String,

    /// SHA-256 hex digest of the raw token
    #[sea_orm(unique)]
    pub key_hash: String,

    /// First characters of the raw token, for display
    pub key_prefix: String,

    pub is_active: bool,

    pub created_at: DateTimeUtc,

    /// Updated on successful validation; last-write-wins under contention
    pub last_used: Option<DateTimeUtc>,

    /// Expiry is checked lazily at validation time, never swept
    pub expires_at: Option<DateTimeUtc>,
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
}

impl Related<super::solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Solution.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
