//! Room reservation entity - A booked time range for a named room.
//!
//! Ranges are half-open: `[starts_at, ends_at)`. Two active (not cancelled)
//! reservations of the same room never overlap; `core::reservation` checks this
//! before inserting.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Room reservation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room_reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Room name, at most 20 characters
    #[sea_orm(indexed)]
    pub name: String,
    /// Start of the reservation (inclusive)
    pub starts_at: DateTimeUtc,
    /// End of the reservation (exclusive)
    pub ends_at: DateTimeUtc,
    /// Cancelled reservations no longer block the room
    pub cancelled: bool,
}

/// `RoomReservation` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
