//! Snapshot codec for the persisted note collection.
//!
//! # Responsibility
//! - Encode the full collection as one JSON array of `{id, title, content,
//!   folder, date}` records.
//! - Decode older or partial snapshots without corrupting the in-memory model.
//!
//! # Invariants
//! - Decoding is all-or-nothing: any structural error rejects the snapshot.
//! - Decoded collections never contain duplicate ids.

use crate::locale::Locale;
use crate::model::note::{Note, NoteId};
use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot encode/decode failure.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid note snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Wire shape accepted on load. Only `id` is mandatory.
#[derive(Debug, Deserialize)]
struct SnapshotRecord {
    id: NoteId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    folder: Option<String>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

/// Serializes the whole collection in display order.
pub fn encode_snapshot(notes: &[Note]) -> SnapshotResult<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Parses a snapshot blob.
///
/// Missing `title`/`content` become empty, a missing `folder` becomes the
/// locale default and a missing `date` becomes `loaded_at`. Later duplicates
/// of an id are dropped.
///
/// # Errors
/// - Returns `SnapshotError::Json` for non-array documents, records without
///   an integer `id`, or any field with the wrong type.
pub fn decode_snapshot(
    blob: &str,
    locale: Locale,
    loaded_at: DateTime<Utc>,
) -> SnapshotResult<Vec<Note>> {
    let records: Vec<SnapshotRecord> = serde_json::from_str(blob)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut notes = Vec::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.id) {
            warn!(
                "event=snapshot_decode module=snapshot status=duplicate_dropped note_id={}",
                record.id
            );
            continue;
        }
        notes.push(Note {
            id: record.id,
            title: record.title,
            content: record.content,
            folder: record
                .folder
                .unwrap_or_else(|| locale.default_folder().to_string()),
            modified_at: record.date.unwrap_or(loaded_at),
        });
    }

    Ok(notes)
}
