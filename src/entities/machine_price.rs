//! Machine price entity - Pricing attached to a machine.
//!
//! Shares its primary key with [`super::machine`], so a machine has at most one
//! price.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Machine price database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "machine_prices")]
pub struct Model {
    /// Id of the priced machine
    #[sea_orm(primary_key, auto_increment = false)]
    pub machine_id: i64,
    /// Base price of the machine, without spares
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
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
