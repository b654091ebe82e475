//! `bboard` - A small bulletin board with a machine inventory
//!
//! This crate serves a bulletin board (rubrics and the bulletins filed under
//! them) and keeps an inventory of machines and their spare parts, including
//! total prices and price-tiered maintenance schedules.

#![deny(
    unsafe_code,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unwrap_used,
    rust_2018_idioms,
)]
// Entity modules name their types after the table; `# Errors` sections only
// where the failure is not obvious from the `Result`.
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Configuration management for database and application settings
pub mod config;
/// Core business logic - framework-agnostic bulletin, inventory and scheduling operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Template filters and tags
pub mod templatetags;
/// HTTP interface - routes, middleware and page rendering
pub mod web;

#[cfg(test)]
pub mod test_utils;
