//! Spare entity - A replaceable part that one or more machines use.
//!
//! Spares are linked to machines through [`super::kit`] rows. Each spare carries
//! its own price, which feeds the machine total price.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Spare database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spares")]
pub struct Model {
    /// Unique identifier for the spare
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Part name (e.g., "Drive belt"), at most 30 characters
    pub name: String,
    /// Price of one unit of this spare
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

/// Defines relationships between Spare and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One spare appears in many kits
    #[sea_orm(has_many = "super::kit::Entity")]
    Kits,
}

impl Related<super::kit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
