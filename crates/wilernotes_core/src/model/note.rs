//! Note domain model.
//!
//! # Responsibility
//! - Define the single note record shared by store, view layer and snapshot.
//! - Keep serialized field names aligned with the persisted snapshot layout.
//!
//! # Invariants
//! - `id` is assigned once at creation and never rewritten.
//! - `modified_at` is rewritten by every field edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier of one note.
///
/// Serialized as a bare JSON number so older snapshots stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl NoteId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One titled unit of markdown text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Raw markdown source; never parsed by core.
    pub content: String,
    pub folder: String,
    /// Serialized as `date` to match the snapshot layout.
    #[serde(rename = "date")]
    pub modified_at: DateTime<Utc>,
}

impl Note {
    /// Builds a note stamped with `modified_at`.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        folder: impl Into<String>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            folder: folder.into(),
            modified_at,
        }
    }

    /// Applies one field edit and restamps the note.
    pub fn apply(&mut self, field: NoteField, now: DateTime<Utc>) {
        match field {
            NoteField::Title(value) => self.title = value,
            NoteField::Content(value) => self.content = value,
            NoteField::Folder(value) => self.folder = value,
        }
        self.modified_at = now;
    }

    /// Content length in characters, as shown in the editor header.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Typed single-field edit accepted by `NoteStore::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteField {
    Title(String),
    Content(String),
    Folder(String),
}

impl NoteField {
    /// Field name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Content(_) => "content",
            Self::Folder(_) => "folder",
        }
    }
}
