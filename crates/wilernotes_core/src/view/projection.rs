use super::date::relative_date;
use super::filter::filtered_notes;
use super::preview::{preview_snippet, DEFAULT_PREVIEW_LEN};
use crate::locale::Locale;
use crate::model::note::{Note, NoteId};
use chrono::{DateTime, TimeZone};

/// One row of the sidebar list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: NoteId,
    pub title: String,
    pub date_label: String,
    /// Snippet, or the locale placeholder when the snippet is empty.
    pub preview: String,
    pub selected: bool,
}

/// Editor header projection of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetail {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub folder: String,
    pub date_label: String,
    pub char_count: usize,
}

/// Filters by `query` and shapes list rows in collection order.
pub fn list_items<Tz: TimeZone>(
    notes: &[Note],
    selected: Option<NoteId>,
    query: &str,
    now: &DateTime<Tz>,
    locale: Locale,
) -> Vec<NoteListItem> {
    filtered_notes(notes, query)
        .into_iter()
        .map(|note| {
            let snippet = preview_snippet(&note.content, DEFAULT_PREVIEW_LEN);
            NoteListItem {
                id: note.id,
                title: note.title.clone(),
                date_label: date_label(note, now, locale),
                preview: if snippet.is_empty() {
                    locale.empty_preview().to_string()
                } else {
                    snippet
                },
                selected: selected == Some(note.id),
            }
        })
        .collect()
}

pub fn note_detail<Tz: TimeZone>(note: &Note, now: &DateTime<Tz>, locale: Locale) -> NoteDetail {
    NoteDetail {
        id: note.id,
        title: note.title.clone(),
        content: note.content.clone(),
        folder: note.folder.clone(),
        date_label: date_label(note, now, locale),
        char_count: note.char_count(),
    }
}

fn date_label<Tz: TimeZone>(note: &Note, now: &DateTime<Tz>, locale: Locale) -> String {
    let modified = note.modified_at.with_timezone(&now.timezone());
    relative_date(&modified, now, locale)
}
