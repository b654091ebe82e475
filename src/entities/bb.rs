//! Bulletin entity - A single advertisement posted on the board.
//!
//! Each bulletin has a title, optional content and price, a publication
//! timestamp and an optional rubric.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bulletin database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bbs")]
pub struct Model {
    /// Unique identifier for the bulletin
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Headline of the bulletin, at most 50 characters
    pub title: String,
    /// Free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    /// Asking price, if any
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub price: Option<Decimal>,
    /// When the bulletin was posted
    #[sea_orm(indexed)]
    pub published: DateTimeUtc,
    /// Rubric the bulletin is filed under
    pub rubric_id: Option<i64>,
}

/// Defines relationships between Bulletin and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each bulletin belongs to at most one rubric
    #[sea_orm(
        belongs_to = "super::rubric::Entity",
        from = "Column::RubricId",
        to = "super::rubric::Column::Id"
    )]
    Rubric,
}

impl Related<super::rubric::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rubric.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
