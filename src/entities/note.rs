//! Note entity - Free-text note attachable to any kind of record.
//!
//! A note stores a tagged reference (`entity_kind`, `entity_id`) instead of a
//! foreign key, so one table serves machines, spares, rubrics and bulletins.
//! `core::note` resolves the reference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of records a note can be attached to
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// [`super::machine`]
    #[sea_orm(string_value = "machine")]
    Machine,
    /// [`super::spare`]
    #[sea_orm(string_value = "spare")]
    Spare,
    /// [`super::rubric`]
    #[sea_orm(string_value = "rubric")]
    Rubric,
    /// [`super::bb`]
    #[sea_orm(string_value = "bb")]
    Bb,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Machine => "machine",
            Self::Spare => "spare",
            Self::Rubric => "rubric",
            Self::Bb => "bulletin",
        };
        f.write_str(name)
    }
}

/// Note database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Note text
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Kind of the referenced record
    pub entity_kind: EntityKind,
    /// Id of the referenced record within its kind
    #[sea_orm(indexed)]
    pub entity_id: i64,
}

/// Notes have no foreign keys; references are resolved in `core::note`
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
