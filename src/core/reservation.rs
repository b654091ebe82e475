//! Room reservations.
//!
//! A reservation books a room for the half-open range `[starts_at, ends_at)`.
//! Ranges must lie within 2000-01-01 .. 3000-01-01. Active reservations of the
//! same room never overlap; cancelled ones no longer count.

use crate::{
    core::clean_name,
    entities::{RoomReservation, room_reservation},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

const ROOM_NAME_MAX_CHARS: usize = 20;

/// 2000-01-01T00:00:00Z
const EARLIEST_TIMESTAMP: i64 = 946_684_800;
/// 3000-01-01T00:00:00Z
const LATEST_TIMESTAMP: i64 = 32_503_680_000;

fn overlaps(
    reservation: &room_reservation::Model,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> bool {
    reservation.starts_at < ends_at && starts_at < reservation.ends_at
}

fn check_range(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<()> {
    if starts_at >= ends_at {
        return Err(Error::InvalidReservation {
            message: "reservation must end after it starts".to_string(),
        });
    }
    if starts_at.timestamp() < EARLIEST_TIMESTAMP {
        return Err(Error::InvalidReservation {
            message: "reservation cannot start before 2000-01-01".to_string(),
        });
    }
    if ends_at.timestamp() > LATEST_TIMESTAMP {
        return Err(Error::InvalidReservation {
            message: "reservation cannot end after 3000-01-01".to_string(),
        });
    }
    Ok(())
}

/// Books a room.
///
/// The overlap check and the insert run in one transaction.
///
/// # Errors
/// Returns an error if:
/// - The room name is empty or longer than 20 characters
/// - The range is empty, inverted or out of bounds
/// - An active reservation of the room overlaps the range
/// - The database insert fails
pub async fn create_reservation(
    db: &DatabaseConnection,
    name: &str,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<room_reservation::Model> {
    let name = clean_name(name, "Room name", ROOM_NAME_MAX_CHARS)?;
    check_range(starts_at, ends_at)?;

    let txn = db.begin().await?;

    let active = RoomReservation::find()
        .filter(room_reservation::Column::Name.eq(name.as_str()))
        .filter(room_reservation::Column::Cancelled.eq(false))
        .all(&txn)
        .await?;
    if active
        .iter()
        .any(|reservation| overlaps(reservation, starts_at, ends_at))
    {
        return Err(Error::ReservationConflict { name });
    }

    let reservation = room_reservation::ActiveModel {
        name: Set(name),
        starts_at: Set(starts_at),
        ends_at: Set(ends_at),
        cancelled: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        "Reserved '{}' from {} to {}",
        reservation.name, reservation.starts_at, reservation.ends_at
    );
    Ok(reservation)
}

/// Cancels a reservation, freeing its time range.
pub async fn cancel_reservation(
    db: &DatabaseConnection,
    reservation_id: i64,
) -> Result<room_reservation::Model> {
    let mut reservation: room_reservation::ActiveModel =
        RoomReservation::find_by_id(reservation_id)
            .one(db)
            .await?
            .ok_or(Error::ReservationNotFound { id: reservation_id })?
            .into();

    reservation.cancelled = Set(true);
    reservation.update(db).await.map_err(Into::into)
}

/// Returns the active reservations of a room ordered by start time.
pub async fn get_active_reservations(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Vec<room_reservation::Model>> {
    RoomReservation::find()
        .filter(room_reservation::Column::Name.eq(name.trim()))
        .filter(room_reservation::Column::Cancelled.eq(false))
        .order_by_asc(room_reservation::Column::StartsAt)
        .all(db)
        .await
        .map_err(Into::into)
}
