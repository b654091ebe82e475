//! Database configuration module for the bulletin board.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the database schema always matches the Rust structs. Creation uses `IF NOT EXISTS`,
//! which makes it safe to run on every startup.

use crate::entities::{
    Bb, Kit, Machine, MachineMaintenance, MachinePrice, Note, RoomReservation, Rubric, Spare,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::debug;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/bboard.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    Ok(())
}

/// Creates every table (and its declared indexes) from the entity definitions.
///
/// Parent tables are created before the tables that reference them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Rubric).await?;
    create_table(db, &schema, Bb).await?;
    create_table(db, &schema, Spare).await?;
    create_table(db, &schema, Machine).await?;
    create_table(db, &schema, Kit).await?;
    create_table(db, &schema, MachinePrice).await?;
    create_table(db, &schema, MachineMaintenance).await?;
    create_table(db, &schema, Note).await?;
    create_table(db, &schema, RoomReservation).await?;

    Ok(())
}
