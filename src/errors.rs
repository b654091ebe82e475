//! Unified error type for the bulletin board.
//!
//! Every fallible operation in the crate returns [`Result`]. Database errors are
//! carried through unchanged so callers can see exactly what the storage layer
//! reported.

use crate::entities::note::EntityKind;
use rust_decimal::Decimal;
use thiserror::Error;

/// All errors produced by the bulletin board.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Error reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (binding the listener, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input rejected before touching the database
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// Prices must be non-negative
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: Decimal,
    },

    /// A date string that is not `YYYY-MM-DD`
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        input: String,
    },

    /// Reservation bounds are out of range or inverted
    #[error("Invalid reservation: {message}")]
    InvalidReservation {
        /// Human-readable reason
        message: String,
    },

    /// A URL segment that cannot name any page
    #[error("Page not found: {path}")]
    PageNotFound { path: String },

    #[error("Machine not found: {id}")]
    MachineNotFound { id: i64 },

    #[error("Spare not found: {id}")]
    SpareNotFound { id: i64 },

    /// The machine exists but has no pricing record attached
    #[error("Machine {machine_id} has no price")]
    PriceNotFound { machine_id: i64 },

    #[error("Rubric not found: {id}")]
    RubricNotFound { id: i64 },

    #[error("Reservation not found: {id}")]
    ReservationNotFound { id: i64 },

    /// A note points at an entity that does not exist
    #[error("Cannot attach note: {kind} {id} does not exist")]
    NoteTargetNotFound { kind: EntityKind, id: i64 },

    /// A kit row references a spare that no longer exists
    #[error("Kit {kit_id} references missing spare {spare_id}")]
    DanglingSpare { kit_id: i64, spare_id: i64 },

    #[error("Machine {machine_id} already uses spare {spare_id}")]
    DuplicateKit { machine_id: i64, spare_id: i64 },

    /// Another active reservation of the same room overlaps the requested range
    #[error("Room '{name}' is already reserved for an overlapping period")]
    ReservationConflict { name: String },

    #[error("Unknown template tag: {name}")]
    UnknownTag { name: String },

    #[error("Template tag '{name}': {message}")]
    TagArguments { name: String, message: String },
}

impl Error {
    /// Shorthand for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
