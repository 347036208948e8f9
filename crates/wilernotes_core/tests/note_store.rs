use std::collections::HashSet;
use wilernotes_core::{
    Locale, MemorySlot, NoteField, NoteId, NoteStore, StoreOptions, WriteMode, SEED_NOTE_ID,
};

fn inline_store(slot: &MemorySlot) -> NoteStore {
    NoteStore::initialize(
        slot.clone(),
        StoreOptions {
            locale: Locale::En,
            write_mode: WriteMode::Inline,
        },
    )
}

fn empty_store() -> (MemorySlot, NoteStore) {
    let slot = MemorySlot::with_blob("[]");
    let store = inline_store(&slot);
    (slot, store)
}

#[test]
fn fresh_session_seeds_welcome_note_and_selects_it() {
    let slot = MemorySlot::new();
    let store = inline_store(&slot);

    assert_eq!(store.notes().len(), 1);
    let seed = &store.notes()[0];
    assert_eq!(seed.id, SEED_NOTE_ID);
    assert_eq!(seed.title, "Notes");
    assert_eq!(seed.folder, "Personal");
    assert!(seed.content.starts_with("# Welcome"));
    assert_eq!(store.selected_id(), Some(SEED_NOTE_ID));
}

#[test]
fn creates_yield_unique_ids_and_matching_size() {
    let (_slot, mut store) = empty_store();

    for _ in 0..25 {
        store.create();
    }

    assert_eq!(store.notes().len(), 25);
    let ids: HashSet<NoteId> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids.len(), 25);
}

#[test]
fn create_prepends_selects_and_persists() {
    let slot = MemorySlot::new();
    let mut store = inline_store(&slot);

    let created = store.create();

    assert_eq!(store.notes()[0], created);
    assert_eq!(store.notes()[1].id, SEED_NOTE_ID);
    assert_eq!(store.selected_id(), Some(created.id));
    assert_eq!(created.title, "New note");
    assert_eq!(created.content, "");
    assert_eq!(created.folder, "Personal");
    assert_eq!(slot.save_count(), 1);
    assert!(slot.blob().unwrap().contains(&created.id.to_string()));
}

#[test]
fn update_touches_only_target_field_and_timestamp() {
    let slot = MemorySlot::new();
    let mut store = inline_store(&slot);
    let target = store.create();
    let other = store.notes()[1].clone();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let updated = store
        .update(target.id, NoteField::Title("Renamed".to_string()))
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.id, target.id);
    assert_eq!(updated.content, target.content);
    assert_eq!(updated.folder, target.folder);
    assert!(updated.modified_at > target.modified_at);
    assert_eq!(store.get(other.id), Some(&other));
    assert_eq!(slot.save_count(), 2);
}

#[test]
fn folder_edits_also_restamp() {
    let slot = MemorySlot::new();
    let mut store = inline_store(&slot);
    let before = store.notes()[0].clone();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let updated = store
        .update(before.id, NoteField::Folder("Work".to_string()))
        .unwrap();

    assert_eq!(updated.folder, "Work");
    assert!(updated.modified_at > before.modified_at);
}

#[test]
fn deleting_unknown_id_changes_nothing() {
    let slot = MemorySlot::new();
    let mut store = inline_store(&slot);
    store.create();
    let before = store.state();
    let saves = slot.save_count();

    let selection = store.delete(NoteId(-1));

    assert_eq!(selection, before.selected);
    assert_eq!(store.state(), before);
    assert_eq!(slot.save_count(), saves);
}

#[test]
fn deleting_selected_note_selects_first_remaining() {
    let (_slot, mut store) = empty_store();
    let oldest = store.create();
    let middle = store.create();
    let newest = store.create();
    store.select(middle.id);

    let selection = store.delete(middle.id);

    assert_eq!(selection, Some(newest.id));
    let remaining: Vec<NoteId> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(remaining, vec![newest.id, oldest.id]);
}

#[test]
fn deleting_unselected_note_keeps_selection() {
    let slot = MemorySlot::new();
    let mut store = inline_store(&slot);
    let created = store.create();

    let selection = store.delete(SEED_NOTE_ID);

    assert_eq!(selection, Some(created.id));
    assert_eq!(store.notes().len(), 1);
}

#[test]
fn deleting_last_note_clears_selection() {
    let slot = MemorySlot::new();
    let mut store = inline_store(&slot);

    let selection = store.delete(SEED_NOTE_ID);

    assert_eq!(selection, None);
    assert!(store.notes().is_empty());
    assert!(store.selected().is_none());
    assert_eq!(slot.blob().as_deref(), Some("[]"));
}

#[test]
fn new_ids_never_collide_with_restored_ids() {
    let far_future = 9_000_000_000_000_i64;
    let slot = MemorySlot::with_blob(format!(
        r#"[{{"id":{far_future},"title":"from the future","content":"","folder":"Personal","date":"2024-01-01T00:00:00Z"}}]"#
    ));
    let mut store = inline_store(&slot);

    let created = store.create();

    assert_eq!(created.id, NoteId(far_future + 1));
}

#[test]
fn creates_after_max_id_stay_unique_across_restart() {
    let slot = MemorySlot::with_blob(format!(r#"[{{"id":{}}}]"#, i64::MAX));
    let mut store = inline_store(&slot);

    let first = store.create();
    let second = store.create();

    assert_ne!(first.id, NoteId(i64::MAX));
    assert_ne!(second.id, NoteId(i64::MAX));
    assert_ne!(first.id, second.id);
    let ids: HashSet<NoteId> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids.len(), 3);

    let restored = inline_store(&slot);
    assert_eq!(restored.notes().len(), 3);
}

#[test]
fn french_locale_drives_defaults() {
    let slot = MemorySlot::new();
    let mut store = NoteStore::initialize(
        slot.clone(),
        StoreOptions {
            locale: Locale::Fr,
            write_mode: WriteMode::Inline,
        },
    );

    assert!(store.notes()[0].content.starts_with("# Bienvenue"));
    let created = store.create();
    assert_eq!(created.title, "Nouvelle note");
    assert_eq!(created.folder, "Personnel");
}
