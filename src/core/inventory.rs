//! Inventory business logic - machines, spares and the kits linking them.
//!
//! A machine uses spares through kit rows carrying a quantity. A machine may
//! have a pricing record; its total price is the machine price plus the price of
//! every spare reached through its kits. Multi-row changes run inside a database
//! transaction so a failure never leaves half of a change applied.

use crate::{
    core::{clean_name, clean_price, note},
    entities::{
        EntityKind, Kit, Machine, MachineMaintenance, MachinePrice, Spare, kit, machine,
        machine_price, spare,
    },
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

const NAME_MAX_CHARS: usize = 30;

/// Creates a spare part with the given unit price.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or longer than 30 characters
/// - The price is negative
/// - The database insert fails
pub async fn create_spare(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
) -> Result<spare::Model> {
    let name = clean_name(name, "Spare name", NAME_MAX_CHARS)?;
    let price = clean_price(price)?;

    let spare = spare::ActiveModel {
        name: Set(name),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!("Created spare {} ({})", spare.id, spare.name);
    Ok(spare)
}

/// Retrieves a spare by id, returning None if it does not exist.
pub async fn get_spare_by_id<C: ConnectionTrait>(
    db: &C,
    spare_id: i64,
) -> Result<Option<spare::Model>> {
    Spare::find_by_id(spare_id).one(db).await.map_err(Into::into)
}

/// Retrieves all spares ordered alphabetically by name.
pub async fn get_all_spares(db: &DatabaseConnection) -> Result<Vec<spare::Model>> {
    Spare::find()
        .order_by_asc(spare::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a machine without pricing.
pub async fn create_machine(db: &DatabaseConnection, name: &str) -> Result<machine::Model> {
    let name = clean_name(name, "Machine name", NAME_MAX_CHARS)?;

    machine::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a machine together with its pricing record.
///
/// Both rows are written in one transaction: either the priced machine exists
/// afterwards or nothing was written.
///
/// # Errors
/// Returns an error if the name or price is invalid, or if either insert fails.
pub async fn create_priced_machine(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
) -> Result<(machine::Model, machine_price::Model)> {
    let name = clean_name(name, "Machine name", NAME_MAX_CHARS)?;
    let price = clean_price(price)?;

    let txn = db.begin().await?;

    let machine = machine::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let pricing = machine_price::ActiveModel {
        machine_id: Set(machine.id),
        price: Set(price),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!("Created machine {} priced at {}", machine.id, pricing.price);
    Ok((machine, pricing))
}

/// Retrieves a machine by id, returning None if it does not exist.
pub async fn get_machine_by_id<C: ConnectionTrait>(
    db: &C,
    machine_id: i64,
) -> Result<Option<machine::Model>> {
    Machine::find_by_id(machine_id).one(db).await.map_err(Into::into)
}

/// Retrieves all machines ordered alphabetically by name.
pub async fn get_all_machines(db: &DatabaseConnection) -> Result<Vec<machine::Model>> {
    Machine::find()
        .order_by_asc(machine::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads a machine, failing with [`Error::MachineNotFound`] if it does not exist.
pub async fn require_machine<C: ConnectionTrait>(db: &C, machine_id: i64) -> Result<machine::Model> {
    get_machine_by_id(db, machine_id)
        .await?
        .ok_or(Error::MachineNotFound { id: machine_id })
}

/// Loads the pricing record of a machine.
///
/// # Errors
/// - [`Error::MachineNotFound`] if the machine does not exist
/// - [`Error::PriceNotFound`] if the machine has never been priced
pub async fn get_machine_price<C: ConnectionTrait>(
    db: &C,
    machine_id: i64,
) -> Result<machine_price::Model> {
    require_machine(db, machine_id).await?;

    MachinePrice::find_by_id(machine_id)
        .one(db)
        .await?
        .ok_or(Error::PriceNotFound { machine_id })
}

/// Sets (or replaces) the price of an existing machine.
pub async fn set_machine_price(
    db: &DatabaseConnection,
    machine_id: i64,
    price: Decimal,
) -> Result<machine_price::Model> {
    let price = clean_price(price)?;

    let txn = db.begin().await?;
    require_machine(&txn, machine_id).await?;

    let pricing = match MachinePrice::find_by_id(machine_id).one(&txn).await? {
        Some(existing) => {
            let mut pricing: machine_price::ActiveModel = existing.into();
            pricing.price = Set(price);
            pricing.update(&txn).await?
        }
        None => {
            machine_price::ActiveModel {
                machine_id: Set(machine_id),
                price: Set(price),
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;
    Ok(pricing)
}

/// Records that a machine uses `count` units of a spare.
///
/// # Errors
/// Returns an error if:
/// - The machine or spare does not exist
/// - The machine already has a kit row for this spare ([`Error::DuplicateKit`])
/// - `count` does not fit the database column
pub async fn add_spare_to_machine(
    db: &DatabaseConnection,
    machine_id: i64,
    spare_id: i64,
    count: u32,
) -> Result<kit::Model> {
    let count = i32::try_from(count)
        .map_err(|_| Error::validation(format!("Kit count {count} is too large")))?;

    let txn = db.begin().await?;

    require_machine(&txn, machine_id).await?;
    get_spare_by_id(&txn, spare_id)
        .await?
        .ok_or(Error::SpareNotFound { id: spare_id })?;

    let existing = Kit::find()
        .filter(kit::Column::MachineId.eq(machine_id))
        .filter(kit::Column::SpareId.eq(spare_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateKit {
            machine_id,
            spare_id,
        });
    }

    let kit = kit::ActiveModel {
        machine_id: Set(machine_id),
        spare_id: Set(spare_id),
        count: Set(count),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    debug!(
        "Machine {} now uses {} x spare {}",
        machine_id, kit.count, spare_id
    );
    Ok(kit)
}

/// Returns every kit row of a machine paired with its spare, in insertion order.
///
/// # Errors
/// Returns [`Error::DanglingSpare`] if a kit references a spare that no longer
/// exists; the partial list is never returned.
pub async fn get_spares_for_machine<C: ConnectionTrait>(
    db: &C,
    machine_id: i64,
) -> Result<Vec<(kit::Model, spare::Model)>> {
    Kit::find()
        .filter(kit::Column::MachineId.eq(machine_id))
        .order_by_asc(kit::Column::Id)
        .find_also_related(Spare)
        .all(db)
        .await?
        .into_iter()
        .map(|(kit, spare)| match spare {
            Some(spare) => Ok((kit, spare)),
            None => Err(Error::DanglingSpare {
                kit_id: kit.id,
                spare_id: kit.spare_id,
            }),
        })
        .collect()
}

/// Computes the total price of a machine: its own price plus the price of the
/// spare behind each of its kit rows.
///
/// The kit `count` does not weight the sum; each kit row contributes its
/// spare's price once.
///
/// # Errors
/// - [`Error::MachineNotFound`] / [`Error::PriceNotFound`] if there is nothing to price
/// - [`Error::DanglingSpare`] if a kit points at a missing spare
pub async fn get_total_price<C: ConnectionTrait>(db: &C, machine_id: i64) -> Result<Decimal> {
    let pricing = get_machine_price(db, machine_id).await?;
    let spares = get_spares_for_machine(db, machine_id).await?;

    let spares_total: Decimal = spares.iter().map(|(_, spare)| spare.price).sum();
    Ok(pricing.price + spares_total)
}

/// Deletes a machine with its kits, pricing, maintenance record and notes.
pub async fn delete_machine(db: &DatabaseConnection, machine_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let machine = require_machine(&txn, machine_id).await?;

    Kit::delete_many()
        .filter(kit::Column::MachineId.eq(machine_id))
        .exec(&txn)
        .await?;
    MachinePrice::delete_by_id(machine_id).exec(&txn).await?;
    MachineMaintenance::delete_by_id(machine_id).exec(&txn).await?;
    note::delete_notes_for(&txn, note::NoteTarget::new(EntityKind::Machine, machine_id)).await?;
    machine.delete(&txn).await?;

    txn.commit().await?;

    info!("Deleted machine {}", machine_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_spare_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_spare(&db, "  ", Decimal::ONE).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        let result = create_spare(&db, "Belt", Decimal::new(-500, 2)).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidPrice { price: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_total_price_without_spares_is_machine_price() -> Result<()> {
        let db = setup_test_db().await?;
        let (machine, _) = create_priced_machine(&db, "Press", Decimal::new(150_000, 2)).await?;

        assert_eq!(get_total_price(&db, machine.id).await?, Decimal::new(1500, 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_total_price_adds_each_linked_spare() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::new(1000, 0)).await?;

        let belt = create_test_spare(&db, "Belt", Decimal::new(2505, 1)).await?;
        let filter = create_test_spare(&db, "Filter", Decimal::new(9925, 2)).await?;
        add_spare_to_machine(&db, machine.id, belt.id, 2).await?;
        add_spare_to_machine(&db, machine.id, filter.id, 5).await?;

        // 1000 + 250.50 + 99.25
        assert_eq!(get_total_price(&db, machine.id).await?, Decimal::new(134_975, 2));
        Ok(())
    }

    #[tokio::test]
    async fn test_total_price_does_not_depend_on_link_order() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_spare(&db, "A", Decimal::new(75, 2)).await?;
        let b = create_test_spare(&db, "B", Decimal::new(40, 0)).await?;

        let (first, _) = create_priced_machine(&db, "First", Decimal::new(10, 0)).await?;
        add_spare_to_machine(&db, first.id, a.id, 1).await?;
        add_spare_to_machine(&db, first.id, b.id, 1).await?;

        let (second, _) = create_priced_machine(&db, "Second", Decimal::new(10, 0)).await?;
        add_spare_to_machine(&db, second.id, b.id, 1).await?;
        add_spare_to_machine(&db, second.id, a.id, 1).await?;

        assert_eq!(
            get_total_price(&db, first.id).await?,
            get_total_price(&db, second.id).await?
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_total_price_fails_on_dangling_spare() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::new(500, 0)).await?;
        let spare = create_test_spare(&db, "Real", Decimal::new(5, 0)).await?;
        add_spare_to_machine(&db, machine.id, spare.id, 1).await?;

        // Bypass the foreign key to simulate a broken inventory row
        db.execute_unprepared("PRAGMA foreign_keys = OFF").await?;
        let dangling = kit::ActiveModel {
            machine_id: Set(machine.id),
            spare_id: Set(999),
            count: Set(1),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let result = get_total_price(&db, machine.id).await;
        match result {
            Err(Error::DanglingSpare { kit_id, spare_id }) => {
                assert_eq!(kit_id, dangling.id);
                assert_eq!(spare_id, 999);
            }
            other => panic!("expected DanglingSpare, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_total_price_requires_pricing() -> Result<()> {
        let db = setup_test_db().await?;
        let machine = create_machine(&db, "Unpriced").await?;

        let result = get_total_price(&db, machine.id).await;
        assert!(matches!(result, Err(Error::PriceNotFound { machine_id }) if machine_id == machine.id));

        let result = get_total_price(&db, 4242).await;
        assert!(matches!(result, Err(Error::MachineNotFound { id: 4242 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_spare_rejects_duplicates_and_missing_rows() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::new(100, 0)).await?;
        let spare = create_test_spare(&db, "Bolt", Decimal::ONE).await?;

        add_spare_to_machine(&db, machine.id, spare.id, 10).await?;

        let result = add_spare_to_machine(&db, machine.id, spare.id, 3).await;
        assert!(matches!(result, Err(Error::DuplicateKit { .. })));

        let result = add_spare_to_machine(&db, machine.id, 777, 1).await;
        assert!(matches!(result, Err(Error::SpareNotFound { id: 777 })));

        let result = add_spare_to_machine(&db, 888, spare.id, 1).await;
        assert!(matches!(result, Err(Error::MachineNotFound { id: 888 })));

        let result = add_spare_to_machine(&db, machine.id, spare.id, u32::MAX).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let kits = get_spares_for_machine(&db, machine.id).await?;
        assert_eq!(kits.len(), 1);
        assert_eq!(kits[0].0.count, 10);
        assert_eq!(kits[0].1.name, "Bolt");
        Ok(())
    }

    #[tokio::test]
    async fn test_set_machine_price_upserts() -> Result<()> {
        let db = setup_test_db().await?;
        let machine = create_machine(&db, "Drill").await?;

        set_machine_price(&db, machine.id, Decimal::new(200, 0)).await?;
        set_machine_price(&db, machine.id, Decimal::new(300, 0)).await?;

        assert_eq!(get_machine_price(&db, machine.id).await?.price, Decimal::new(300, 0));
        assert_eq!(MachinePrice::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_machine_reaches_spares_through_kits() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::new(100, 0)).await?;
        let spare = create_test_spare(&db, "Gear", Decimal::new(12, 0)).await?;
        add_spare_to_machine(&db, machine.id, spare.id, 4).await?;

        let spares = machine.find_related(Spare).all(&db).await?;
        assert_eq!(spares, vec![spare]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_machine_removes_dependents() -> Result<()> {
        let (db, machine) = setup_with_priced_machine(Decimal::new(100, 0)).await?;
        let spare = create_test_spare(&db, "Chain", Decimal::new(8, 0)).await?;
        add_spare_to_machine(&db, machine.id, spare.id, 1).await?;
        note::add_note(
            &db,
            note::NoteTarget::new(EntityKind::Machine, machine.id),
            "Oil weekly",
        )
        .await?;

        delete_machine(&db, machine.id).await?;

        assert!(get_machine_by_id(&db, machine.id).await?.is_none());
        assert_eq!(Kit::find().count(&db).await?, 0);
        assert_eq!(MachinePrice::find().count(&db).await?, 0);
        assert_eq!(crate::entities::Note::find().count(&db).await?, 0);
        // The spare itself survives
        assert!(get_spare_by_id(&db, spare.id).await?.is_some());
        Ok(())
    }
}
