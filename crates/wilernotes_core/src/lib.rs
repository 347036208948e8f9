//! Core domain logic for WilerNotes.
//! This crate is the single source of truth for note collection invariants.

pub mod appearance;
pub mod config;
pub mod db;
pub mod locale;
pub mod logging;
pub mod model;
pub mod slot;
pub mod store;
pub mod view;
pub mod window;

pub use appearance::{Appearance, Theme, ThemePalette};
pub use config::StoreConfig;
pub use locale::Locale;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteField, NoteId};
pub use model::snapshot::{decode_snapshot, encode_snapshot, SnapshotError};
pub use slot::{MemorySlot, SlotError, SlotResult, SnapshotSlot, SqliteSlot, DEFAULT_SLOT_KEY};
pub use store::{
    seed_collection, LoadOutcome, NoteStore, StoreOptions, StoreState, WriteCounts, WriteMode,
    SEED_NOTE_ID,
};
pub use view::{
    filtered_notes, list_items, note_detail, preview_snippet, relative_date, NoteDetail,
    NoteListItem, DEFAULT_PREVIEW_LEN,
};
pub use window::{relay as relay_window_control, WindowControl, WindowControlError, WindowHost};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
