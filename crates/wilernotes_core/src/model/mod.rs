//! Note domain model and its persisted snapshot shape.
//!
//! # Responsibility
//! - Define the canonical `Note` record used by store and view layers.
//! - Own the JSON snapshot codec written to the durable slot.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod note;
pub mod snapshot;
