//! Machine maintenance entity - The last generated maintenance schedule.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Machine maintenance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "machine_maintenance")]
pub struct Model {
    /// Id of the maintained machine
    #[sea_orm(primary_key, auto_increment = false)]
    pub machine_id: i64,
    /// Twelve `YYYY-MM-DD` dates joined by `", "`
    #[sea_orm(column_type = "Text")]
    pub maintenance_schedule: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::machine::Entity",
        from = "Column::MachineId",
        to = "super::machine::Column::Id"
    )]
    Machine,
}

impl Related<super::machine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Machine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
