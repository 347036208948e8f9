//! Query/view layer.
//!
//! # Responsibility
//! - Derive search results and display strings from store state.
//! - Shape list/detail projections consumed by presentation shells.
//!
//! # Invariants
//! - Every function here is pure: no store mutation, no persistence.
//! - Derivations never fail; degenerate input yields empty strings.

mod date;
mod filter;
mod preview;
mod projection;

pub use date::{relative_date, MS_PER_DAY, MS_PER_HOUR};
pub use filter::filtered_notes;
pub use preview::{preview_snippet, DEFAULT_PREVIEW_LEN, ELLIPSIS};
pub use projection::{list_items, note_detail, NoteDetail, NoteListItem};
