//! Core business logic - framework-agnostic operations over the database.
//!
//! Every function takes a `SeaORM` connection (or transaction) and returns
//! [`crate::errors::Result`]. The web layer only formats what these functions
//! return.

/// Bulletins and rubrics
pub mod bulletin;
/// Machines, spares, kits and total price computation
pub mod inventory;
/// Price-tiered maintenance schedules
pub mod maintenance;
/// Notes attachable to any record kind
pub mod note;
/// Room reservations without overlaps
pub mod reservation;

use crate::errors::{Error, Result};
use rust_decimal::Decimal;

/// Trims `value` and checks that it is non-empty and at most `max_chars` long.
pub(crate) fn clean_name(value: &str, field: &str, max_chars: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(Error::validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Rejects negative prices and rounds to cents.
pub(crate) fn clean_price(price: Decimal) -> Result<Decimal> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(Error::InvalidPrice { price });
    }
    Ok(price.round_dp(2))
}
