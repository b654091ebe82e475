//! Kit entity - Join row saying "this machine uses `count` units of this spare".
//!
//! The `(machine_id, spare_id)` pair is unique; `core::inventory` enforces it
//! when kits are added.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kit database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Machine that uses the spare
    pub machine_id: i64,
    /// Spare used by the machine
    pub spare_id: i64,
    /// Number of units, never negative
    pub count: i32,
}

/// Defines relationships between Kit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::machine::Entity",
        from = "Column::MachineId",
        to = "super::machine::Column::Id"
    )]
    Machine,
    #[sea_orm(
        belongs_to = "super::spare::Entity",
        from = "Column::SpareId",
        to = "super::spare::Column::Id"
    )]
    Spare,
}

impl Related<super::machine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Machine.def()
    }
}

impl Related<super::spare::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spare.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
