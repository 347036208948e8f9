//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the snapshot slot.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Slot reads/writes must not happen before migrations succeed.
//! - Failures surface as `SlotError`, the only error the slot layer reports.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
