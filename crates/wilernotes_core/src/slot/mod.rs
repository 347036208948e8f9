//! Persistence adapter for the serialized note collection.
//!
//! # Responsibility
//! - Define the `load`/`save` contract the store depends on.
//! - Provide SQLite-backed and in-memory slot implementations.
//!
//! # Invariants
//! - A slot holds at most one blob; `save` replaces it wholesale.
//! - Slots never interpret the blob; decoding lives in `model::snapshot`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemorySlot;
pub use sqlite::{SqliteSlot, DEFAULT_SLOT_KEY};

pub type SlotResult<T> = Result<T, SlotError>;

/// Durable storage failure reported by a slot.
#[derive(Debug)]
pub enum SlotError {
    Sqlite(rusqlite::Error),
    /// The database was written by a newer build with more migrations.
    SchemaTooNew { found: u32, supported: u32 },
    /// Slot backend refused the operation.
    Unavailable(String),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "snapshot database schema {found} is newer than supported {supported}"
            ),
            Self::Unavailable(message) => write!(f, "snapshot slot unavailable: {message}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// One named durable cell holding the latest snapshot.
///
/// `Send` so the background writer can own it on its own thread.
pub trait SnapshotSlot: Send {
    /// Returns the stored blob, or `None` when nothing was saved yet.
    fn load(&self) -> SlotResult<Option<String>>;
    /// Replaces the stored blob.
    fn save(&self, blob: &str) -> SlotResult<()>;
}

impl<S: SnapshotSlot + ?Sized> SnapshotSlot for Box<S> {
    fn load(&self) -> SlotResult<Option<String>> {
        (**self).load()
    }

    fn save(&self, blob: &str) -> SlotResult<()> {
        (**self).save(blob)
    }
}
