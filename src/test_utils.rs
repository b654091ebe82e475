//! Shared test utilities for the bulletin board.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{bulletin, inventory},
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a rubric with the given name.
pub async fn create_test_rubric(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::rubric::Model> {
    bulletin::create_rubric(db, name).await
}

/// Creates a bulletin in the given rubric.
///
/// # Defaults
/// * `content`: None
/// * `price`: None
pub async fn create_test_bulletin(
    db: &DatabaseConnection,
    title: &str,
    rubric_id: i64,
) -> Result<entities::bb::Model> {
    bulletin::create_bulletin(db, title, None, None, Some(rubric_id)).await
}

/// Creates a spare with the given price.
pub async fn create_test_spare(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
) -> Result<entities::spare::Model> {
    inventory::create_spare(db, name, price).await
}

/// Sets up a complete test environment with a rubric.
/// Returns (db, rubric) for bulletin-related tests.
pub async fn setup_with_rubric(
    name: &str,
) -> Result<(DatabaseConnection, entities::rubric::Model)> {
    let db = setup_test_db().await?;
    let rubric = create_test_rubric(&db, name).await?;
    Ok((db, rubric))
}

/// Sets up a complete test environment with a machine named "Test Machine"
/// priced at `price`.
pub async fn setup_with_priced_machine(
    price: Decimal,
) -> Result<(DatabaseConnection, entities::machine::Model)> {
    let db = setup_test_db().await?;
    let (machine, _) = inventory::create_priced_machine(&db, "Test Machine", price).await?;
    Ok((db, machine))
}
