//! Note collection store.
//!
//! # Responsibility
//! - Own the authoritative ordered note collection and the selection.
//! - Expose create/update/delete/select use-cases for shells.
//! - Schedule a full-collection snapshot after every mutation.
//!
//! # Invariants
//! - Note ids are unique; display order is collection order.
//! - New notes are prepended and become the selection.
//! - Selection always references an existing note or is `None`.
//! - Operations on unknown ids are no-ops and do not write.
//! - Nothing here returns an error to the caller; failures degrade and log.

mod id;
mod writer;

pub use id::IdAllocator;
pub use writer::{SnapshotWriter, WriteCounts, WriteMode};

use crate::locale::Locale;
use crate::model::note::{Note, NoteField, NoteId};
use crate::model::snapshot::{decode_snapshot, encode_snapshot};
use crate::slot::SnapshotSlot;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

/// Id of the welcome note seeded into an empty session.
pub const SEED_NOTE_ID: NoteId = NoteId(1);

/// Session-level store settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub locale: Locale,
    pub write_mode: WriteMode,
}

/// Owned copy of the store state for shells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreState {
    pub notes: Vec<Note>,
    pub selected: Option<NoteId>,
}

/// How the collection was obtained at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot was found and decoded.
    Restored,
    /// No snapshot existed yet.
    SeededEmpty,
    /// The slot could not be read or the snapshot was malformed.
    SeededFallback,
}

/// In-memory note collection backed by one snapshot slot.
pub struct NoteStore {
    notes: Vec<Note>,
    selected: Option<NoteId>,
    ids: IdAllocator,
    locale: Locale,
    load_outcome: LoadOutcome,
    writer: SnapshotWriter,
}

impl NoteStore {
    /// Loads the persisted collection, or seeds the welcome note.
    ///
    /// Never fails: read errors and malformed snapshots are logged and
    /// treated as "no prior state". Initialization itself does not write, so a
    /// malformed snapshot stays in the slot until the first mutation.
    pub fn initialize(slot: impl SnapshotSlot + 'static, options: StoreOptions) -> Self {
        let now = Utc::now();
        let (notes, load_outcome) = load_collection(&slot, options.locale, now);
        let selected = notes.first().map(|note| note.id);

        info!(
            "event=store_init module=store status=ok outcome={:?} note_count={} write_mode={:?} locale={}",
            load_outcome,
            notes.len(),
            options.write_mode,
            options.locale.code()
        );

        Self {
            ids: IdAllocator::above(&notes),
            notes,
            selected,
            locale: options.locale,
            load_outcome,
            writer: SnapshotWriter::new(Box::new(slot), options.write_mode),
        }
    }

    /// Creates a blank note, prepends it and selects it.
    pub fn create(&mut self) -> Note {
        let now = Utc::now();
        let note = Note::new(
            self.ids.next(now.timestamp_millis(), &self.notes),
            self.locale.new_note_title(),
            "",
            self.locale.default_folder(),
            now,
        );
        self.notes.insert(0, note.clone());
        self.selected = Some(note.id);
        debug!(
            "event=note_create module=store status=ok note_id={} note_count={}",
            note.id,
            self.notes.len()
        );
        self.persist("create");
        note
    }

    /// Replaces one field of note `id` and restamps it.
    ///
    /// Returns the single authoritative updated note, or `None` (no write)
    /// when `id` is unknown.
    pub fn update(&mut self, id: NoteId, field: NoteField) -> Option<Note> {
        let field_name = field.name();
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!(
                "event=note_update module=store status=skipped reason=not_found note_id={id} field={field_name}"
            );
            return None;
        };
        note.apply(field, Utc::now());
        let updated = note.clone();
        debug!("event=note_update module=store status=ok note_id={id} field={field_name}");
        self.persist("update");
        Some(updated)
    }

    /// Removes note `id` and returns the resulting selection.
    ///
    /// Deleting the selected note moves the selection to the first remaining
    /// note. Unknown ids leave collection and selection untouched.
    pub fn delete(&mut self, id: NoteId) -> Option<NoteId> {
        let Some(index) = self.position(id) else {
            debug!("event=note_delete module=store status=skipped reason=not_found note_id={id}");
            return self.selected;
        };
        self.notes.remove(index);
        if self.selected == Some(id) {
            self.selected = self.notes.first().map(|note| note.id);
        }
        debug!(
            "event=note_delete module=store status=ok note_id={id} note_count={}",
            self.notes.len()
        );
        self.persist("delete");
        self.selected
    }

    /// Explicit user pick. Selection only moves when `id` exists.
    pub fn select(&mut self, id: NoteId) -> Option<&Note> {
        let index = self.position(id)?;
        self.selected = Some(id);
        self.notes.get(index)
    }

    /// Pure lookup by id.
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected_id(&self) -> Option<NoteId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Owned copy of collection and selection.
    pub fn state(&self) -> StoreState {
        StoreState {
            notes: self.notes.clone(),
            selected: self.selected,
        }
    }

    /// Blocks until every scheduled snapshot has been attempted.
    pub fn flush(&self) {
        self.writer.flush();
    }

    pub fn write_counts(&self) -> WriteCounts {
        self.writer.counts()
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn persist(&self, operation: &'static str) {
        match encode_snapshot(&self.notes) {
            Ok(blob) => self.writer.schedule(blob),
            Err(err) => warn!(
                "event=snapshot_encode module=store status=error operation={operation} error={err}"
            ),
        }
    }
}

/// The single welcome note used when no snapshot is available.
pub fn seed_collection(locale: Locale, now: DateTime<Utc>) -> Vec<Note> {
    vec![Note::new(
        SEED_NOTE_ID,
        locale.welcome_title(),
        locale.welcome_content(),
        locale.default_folder(),
        now,
    )]
}

fn load_collection(
    slot: &dyn SnapshotSlot,
    locale: Locale,
    now: DateTime<Utc>,
) -> (Vec<Note>, LoadOutcome) {
    match slot.load() {
        Ok(Some(blob)) => match decode_snapshot(&blob, locale, now) {
            Ok(notes) => (notes, LoadOutcome::Restored),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=store status=fallback reason=malformed bytes={} error={}",
                    blob.len(),
                    err
                );
                (seed_collection(locale, now), LoadOutcome::SeededFallback)
            }
        },
        Ok(None) => (seed_collection(locale, now), LoadOutcome::SeededEmpty),
        Err(err) => {
            warn!("event=snapshot_load module=store status=fallback reason=read_failed error={err}");
            (seed_collection(locale, now), LoadOutcome::SeededFallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, StoreOptions, WriteMode, SEED_NOTE_ID};
    use crate::model::note::{NoteField, NoteId};
    use crate::slot::MemorySlot;

    fn inline_store(slot: &MemorySlot) -> NoteStore {
        NoteStore::initialize(
            slot.clone(),
            StoreOptions {
                write_mode: WriteMode::Inline,
                ..StoreOptions::default()
            },
        )
    }

    #[test]
    fn select_unknown_id_keeps_current_selection() {
        let slot = MemorySlot::new();
        let mut store = inline_store(&slot);

        assert!(store.select(NoteId(404)).is_none());
        assert_eq!(store.selected_id(), Some(SEED_NOTE_ID));
        assert_eq!(slot.save_count(), 0);
    }

    #[test]
    fn select_does_not_write() {
        let slot = MemorySlot::new();
        let mut store = inline_store(&slot);
        let created = store.create();
        let saves = slot.save_count();

        let picked = store.select(SEED_NOTE_ID).map(|note| note.id);

        assert_eq!(picked, Some(SEED_NOTE_ID));
        assert_eq!(store.selected_id(), Some(SEED_NOTE_ID));
        assert_ne!(created.id, SEED_NOTE_ID);
        assert_eq!(slot.save_count(), saves);
    }

    #[test]
    fn update_unknown_id_is_a_silent_no_op() {
        let slot = MemorySlot::new();
        let mut store = inline_store(&slot);
        let before = store.state();

        let result = store.update(NoteId(99), NoteField::Title("x".to_string()));

        assert!(result.is_none());
        assert_eq!(store.state(), before);
        assert_eq!(slot.save_count(), 0);
    }

    #[test]
    fn update_returns_the_stored_note() {
        let slot = MemorySlot::new();
        let mut store = inline_store(&slot);
        let id = store.create().id;

        let updated = store
            .update(id, NoteField::Content("# body".to_string()))
            .unwrap();

        assert_eq!(store.get(id), Some(&updated));
        assert_eq!(store.selected(), Some(&updated));
    }
}
