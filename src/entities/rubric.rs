//! Rubric entity - A bulletin board category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rubric database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rubrics")]
pub struct Model {
    /// Unique identifier for the rubric
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Vehicles"), unique, at most 20 characters
    #[sea_orm(unique)]
    pub name: String,
}

/// Defines relationships between Rubric and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One rubric groups many bulletins
    #[sea_orm(has_many = "super::bb::Entity")]
    Bbs,
}

impl Related<super::bb::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bbs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
