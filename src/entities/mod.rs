//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bb;
pub mod kit;
pub mod machine;
pub mod machine_maintenance;
pub mod machine_price;
pub mod note;
pub mod room_reservation;
pub mod rubric;
pub mod spare;

// Re-export specific types to avoid conflicts
pub use bb::{Column as BbColumn, Entity as Bb, Model as BbModel};
pub use kit::{Column as KitColumn, Entity as Kit, Model as KitModel};
pub use machine::{Column as MachineColumn, Entity as Machine, Model as MachineModel};
pub use machine_maintenance::{
    Column as MachineMaintenanceColumn, Entity as MachineMaintenance,
    Model as MachineMaintenanceModel,
};
pub use machine_price::{
    Column as MachinePriceColumn, Entity as MachinePrice, Model as MachinePriceModel,
};
pub use note::{Column as NoteColumn, Entity as Note, EntityKind, Model as NoteModel};
pub use room_reservation::{
    Column as RoomReservationColumn, Entity as RoomReservation, Model as RoomReservationModel,
};
pub use rubric::{Column as RubricColumn, Entity as Rubric, Model as RubricModel};
pub use spare::{Column as SpareColumn, Entity as Spare, Model as SpareModel};
