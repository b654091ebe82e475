//! Machine entity - A composite inventory item built from spares.
//!
//! Pricing and maintenance data are not columns of this table; they live in
//! [`super::machine_price`] and [`super::machine_maintenance`], keyed by the
//! machine id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Machine database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "machines")]
pub struct Model {
    /// Unique identifier for the machine
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Machine name, at most 30 characters
    pub name: String,
}

/// Defines relationships between Machine and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One machine has many kit rows
    #[sea_orm(has_many = "super::kit::Entity")]
    Kits,
    /// Optional pricing record sharing the machine id
    #[sea_orm(has_one = "super::machine_price::Entity")]
    Price,
    /// Optional maintenance record sharing the machine id
    #[sea_orm(has_one = "super::machine_maintenance::Entity")]
    Maintenance,
}

impl Related<super::kit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kits.def()
    }
}

impl Related<super::machine_price::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Price.def()
    }
}

impl Related<super::machine_maintenance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Maintenance.def()
    }
}

/// Machines reach their spares through the kit table
impl Related<super::spare::Entity> for Entity {
    fn to() -> RelationDef {
        super::kit::Relation::Spare.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::kit::Relation::Machine.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
