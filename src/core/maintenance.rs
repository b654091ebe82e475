//! Maintenance schedule generation.
//!
//! The service interval depends on the machine price:
//!
//! | price                  | interval  |
//! |------------------------|-----------|
//! | `price <= 1000`        | 12 months |
//! | `1000 < price <= 5000` | 6 months  |
//! | `price > 5000`         | 3 months  |
//!
//! A schedule is twelve dates: the start date followed by eleven steps of one
//! interval each. A month counts as exactly 30 days. The formatted schedule is
//! stored on the machine's maintenance record, replacing any previous one.

use crate::{
    core::inventory,
    entities::{MachineMaintenance, machine_maintenance},
    errors::{Error, Result},
};
use chrono::{Datelike, Days, Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;

/// Number of dates in a generated schedule, the start date included
pub const SCHEDULE_LEN: u32 = 12;

/// A month is approximated as this many days
pub const DAYS_PER_MONTH: u32 = 30;

/// Separator between formatted dates
pub const SCHEDULE_SEPARATOR: &str = ", ";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Selects the maintenance interval in months for a machine price.
///
/// # Errors
/// Returns [`Error::InvalidPrice`] for a negative price.
pub fn maintenance_interval_months(price: Decimal) -> Result<u32> {
    if price < Decimal::ZERO {
        return Err(Error::InvalidPrice { price });
    }

    let interval = if price <= Decimal::from(1000) {
        12
    } else if price <= Decimal::from(5000) {
        6
    } else {
        3
    };
    Ok(interval)
}

/// Generates the twelve maintenance dates for a machine of the given price.
///
/// # Errors
/// Returns an error for a negative price, or when a date would fall outside
/// the four-digit year range.
pub fn generate_schedule(start_date: NaiveDate, price: Decimal) -> Result<Vec<NaiveDate>> {
    let interval = maintenance_interval_months(price)?;

    (0..SCHEDULE_LEN)
        .map(|step| {
            let days = u64::from(step * DAYS_PER_MONTH * interval);
            start_date
                .checked_add_days(Days::new(days))
                .filter(|date| (1..=9999).contains(&date.year()))
                .ok_or_else(|| {
                    Error::validation(format!(
                        "Maintenance date {step} after {start_date} is out of range"
                    ))
                })
        })
        .collect()
}

/// Formats dates as `YYYY-MM-DD` joined by `", "`.
#[must_use]
pub fn format_schedule(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect::<Vec<_>>()
        .join(SCHEDULE_SEPARATOR)
}

/// Parses a `YYYY-MM-DD` start date.
pub fn parse_start_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        input: input.to_string(),
    })
}

/// Generates and stores the maintenance schedule of a priced machine.
///
/// `start_date` defaults to today. The schedule is written in a single
/// transaction that overwrites the previous value; if anything fails the
/// previous schedule is left untouched.
///
/// # Errors
/// - [`Error::MachineNotFound`] / [`Error::PriceNotFound`] if the machine cannot be priced
/// - [`Error::InvalidPrice`] if the stored price is negative
/// - [`Error::Database`] if the write fails
pub async fn create_maintenance_schedule(
    db: &DatabaseConnection,
    machine_id: i64,
    start_date: Option<NaiveDate>,
) -> Result<String> {
    let start_date = start_date.unwrap_or_else(|| Local::now().date_naive());

    let txn = db.begin().await?;

    let pricing = inventory::get_machine_price(&txn, machine_id).await?;
    let schedule = format_schedule(&generate_schedule(start_date, pricing.price)?);

    match MachineMaintenance::find_by_id(machine_id).one(&txn).await? {
        Some(existing) => {
            let mut maintenance: machine_maintenance::ActiveModel = existing.into();
            maintenance.maintenance_schedule = Set(schedule.clone());
            maintenance.update(&txn).await?;
        }
        None => {
            machine_maintenance::ActiveModel {
                machine_id: Set(machine_id),
                maintenance_schedule: Set(schedule.clone()),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;

    info!(
        "Generated maintenance schedule for machine {} starting {}",
        machine_id, start_date
    );
    Ok(schedule)
}

/// Returns the stored maintenance schedule of a machine, if one was generated.
pub async fn get_maintenance_schedule(
    db: &DatabaseConnection,
    machine_id: i64,
) -> Result<Option<String>> {
    Ok(MachineMaintenance::find_by_id(machine_id)
        .one(db)
        .await?
        .map(|maintenance| maintenance.maintenance_schedule))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{MachinePrice, machine_price};
    use crate::test_utils::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_interval_tier_boundaries() {
        let cases = [
            (Decimal::ZERO, 12),
            (Decimal::new(100_000, 2), 12),
            (Decimal::new(100_001, 2), 6),
            (Decimal::new(500_000, 2), 6),
            (Decimal::new(500_001, 2), 3),
            (Decimal::new(1_000_000, 0), 3),
        ];
        for (price, expected) in cases {
            assert_eq!(maintenance_interval_months(price).unwrap(), expected, "price {price}");
        }
    }

    #[test]
    fn test_interval_rejects_negative_price() {
        let result = maintenance_interval_months(Decimal::new(-1, 2));
        assert!(matches!(result, Err(Error::InvalidPrice { price: _ })));
    }

    #[test]
    fn test_generate_schedule_uses_thirty_day_months() {
        let dates = generate_schedule(date(2024, 1, 1), Decimal::from(1000)).unwrap();

        assert_eq!(dates.len(), 12);
        assert_eq!(dates[0], date(2024, 1, 1));
        // 12 months of 30 days
        assert_eq!(dates[1], date(2024, 12, 26));
        assert_eq!(dates[11], date(2024, 1, 1) + Days::new(11 * 360));
    }

    #[test]
    fn test_generate_schedule_quarterly_tier() {
        let dates = generate_schedule(date(2024, 1, 1), Decimal::from(9000)).unwrap();
        assert_eq!(dates[1], date(2024, 3, 31));
        assert_eq!(dates[2], date(2024, 6, 29));
    }

    #[test]
    fn test_format_schedule_shape() {
        let text = format_schedule(&generate_schedule(date(2024, 1, 1), Decimal::from(1000)).unwrap());

        let parts: Vec<&str> = text.split(SCHEDULE_SEPARATOR).collect();
        assert_eq!(parts.len(), 12);
        assert_eq!(parts[0], "2024-01-01");
        assert!(parts.iter().all(|part| part.len() == 10));
    }

    #[test]
    fn test_generate_schedule_rejects_out_of_range_dates() {
        let result = generate_schedule(date(9995, 1, 1), Decimal::ZERO);
        assert!(matches!(result, Err(Error::Validation { message: _ })));
    }

    #[test]
    fn test_parse_start_date() {
        assert_eq!(parse_start_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert!(matches!(
            parse_start_date("2024-02-30"),
            Err(Error::InvalidDate { input: _ })
        ));
        assert!(parse_start_date("01/02/2024").is_err());
        assert!(parse_start_date("").is_err());
    }

    #[tokio::test]
    async fn test_create_schedule_persists_and_returns_text() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::from(1000)).await?;

        let schedule = create_maintenance_schedule(&db, machine.id, Some(date(2024, 1, 1))).await?;

        assert!(schedule.starts_with("2024-01-01, 2024-12-26, "));
        assert_eq!(
            get_maintenance_schedule(&db, machine.id).await?,
            Some(schedule)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_create_schedule_is_idempotent() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::from(2500)).await?;

        let first = create_maintenance_schedule(&db, machine.id, Some(date(2024, 6, 1))).await?;
        let second = create_maintenance_schedule(&db, machine.id, Some(date(2024, 6, 1))).await?;

        assert_eq!(first, second);
        assert_eq!(MachineMaintenance::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_regenerating_overwrites_previous_schedule() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::from(7000)).await?;

        create_maintenance_schedule(&db, machine.id, Some(date(2024, 1, 1))).await?;
        let second = create_maintenance_schedule(&db, machine.id, Some(date(2025, 3, 15))).await?;

        let stored = get_maintenance_schedule(&db, machine.id).await?.unwrap();
        assert_eq!(stored, second);
        assert!(stored.starts_with("2025-03-15"));
        assert!(!stored.contains("2024-01-01"));
        assert_eq!(stored.split(SCHEDULE_SEPARATOR).count(), 12);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_regeneration_keeps_previous_schedule() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::from(1000)).await?;
        let original = create_maintenance_schedule(&db, machine.id, Some(date(2024, 1, 1))).await?;

        // Corrupt the stored price behind the validation in `set_machine_price`
        let mut pricing: machine_price::ActiveModel = MachinePrice::find_by_id(machine.id)
            .one(&db)
            .await?
            .unwrap()
            .into();
        pricing.price = Set(Decimal::from(-5));
        pricing.update(&db).await?;

        let result = create_maintenance_schedule(&db, machine.id, Some(date(2030, 1, 1))).await;
        assert!(matches!(result, Err(Error::InvalidPrice { price: _ })));
        assert_eq!(
            get_maintenance_schedule(&db, machine.id).await?,
            Some(original)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_create_schedule_defaults_to_today() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::from(10)).await?;

        let schedule = create_maintenance_schedule(&db, machine.id, None).await?;
        let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
        assert!(schedule.starts_with(&today));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_schedule_requires_priced_machine() -> Result<()> {
        let db = setup_test_db().await?;
        let machine = inventory::create_machine(&db, "Bare").await?;

        let result = create_maintenance_schedule(&db, machine.id, Some(date(2024, 1, 1))).await;
        assert!(matches!(result, Err(Error::PriceNotFound { .. })));

        let result = create_maintenance_schedule(&db, 31337, Some(date(2024, 1, 1))).await;
        assert!(matches!(result, Err(Error::MachineNotFound { id: 31337 })));

        assert!(get_maintenance_schedule(&db, machine.id).await?.is_none());
        Ok(())
    }
}
