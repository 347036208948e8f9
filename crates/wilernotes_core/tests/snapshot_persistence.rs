use chrono::Utc;
use wilernotes_core::{
    decode_snapshot, encode_snapshot, seed_collection, LoadOutcome, Locale, MemorySlot, NoteField,
    NoteStore, SnapshotSlot, SqliteSlot, StoreOptions, WriteMode, DEFAULT_SLOT_KEY,
};

fn options(write_mode: WriteMode) -> StoreOptions {
    StoreOptions {
        locale: Locale::En,
        write_mode,
    }
}

#[test]
fn seed_collection_round_trips_through_sqlite_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");
    let seed = seed_collection(Locale::En, Utc::now());

    {
        let slot = SqliteSlot::open(&path, DEFAULT_SLOT_KEY).unwrap();
        slot.save(&encode_snapshot(&seed).unwrap()).unwrap();
    }

    let slot = SqliteSlot::open(&path, DEFAULT_SLOT_KEY).unwrap();
    let blob = slot.load().unwrap().unwrap();
    let loaded = decode_snapshot(&blob, Locale::En, Utc::now()).unwrap();
    assert_eq!(loaded, seed);
}

#[test]
fn edits_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let (created_id, state_before) = {
        let slot = SqliteSlot::open(&path, DEFAULT_SLOT_KEY).unwrap();
        let mut store = NoteStore::initialize(slot, options(WriteMode::Background));
        let created = store.create();
        store.update(created.id, NoteField::Title("Shopping".to_string()));
        store.update(created.id, NoteField::Content("- eggs\n- *bread*".to_string()));
        store.flush();
        (created.id, store.state())
    };

    let slot = SqliteSlot::open(&path, DEFAULT_SLOT_KEY).unwrap();
    let store = NoteStore::initialize(slot, options(WriteMode::Inline));

    assert_eq!(store.load_outcome(), LoadOutcome::Restored);
    assert_eq!(store.notes(), state_before.notes.as_slice());
    assert_eq!(store.selected_id(), Some(created_id));
    assert_eq!(store.get(created_id).unwrap().title, "Shopping");
}

#[test]
fn malformed_snapshot_falls_back_to_seed_without_overwriting() {
    let slot = MemorySlot::with_blob("{ not json");
    let store = NoteStore::initialize(slot.clone(), options(WriteMode::Inline));

    assert_eq!(store.load_outcome(), LoadOutcome::SeededFallback);
    assert_eq!(store.notes().len(), 1);
    assert_eq!(slot.blob().as_deref(), Some("{ not json"));
}

#[test]
fn unreadable_slot_falls_back_to_seed() {
    let slot = MemorySlot::new();
    slot.set_failing(true);

    let store = NoteStore::initialize(slot, options(WriteMode::Inline));

    assert_eq!(store.load_outcome(), LoadOutcome::SeededFallback);
    assert_eq!(store.notes().len(), 1);
}

#[test]
fn empty_snapshot_restores_an_empty_collection() {
    let store = NoteStore::initialize(MemorySlot::with_blob("[]"), options(WriteMode::Inline));

    assert_eq!(store.load_outcome(), LoadOutcome::Restored);
    assert!(store.notes().is_empty());
    assert_eq!(store.selected_id(), None);
}

#[test]
fn failed_writes_keep_in_memory_state_authoritative() {
    let slot = MemorySlot::new();
    let mut store = NoteStore::initialize(slot.clone(), options(WriteMode::Inline));
    slot.set_failing(true);

    let created = store.create();
    let renamed = store
        .update(created.id, NoteField::Title("kept".to_string()))
        .unwrap();

    assert_eq!(store.notes().len(), 2);
    assert_eq!(store.selected(), Some(&renamed));
    assert_eq!(store.write_counts().writes_failed, 2);
    assert_eq!(store.write_counts().writes_ok, 0);
    assert_eq!(slot.blob(), None);
}

#[test]
fn inline_and_background_writers_converge_on_last_state() {
    for mode in [WriteMode::Inline, WriteMode::Background] {
        let slot = MemorySlot::new();
        let mut store = NoteStore::initialize(slot.clone(), options(mode));
        let created = store.create();
        for n in 0..20 {
            store.update(created.id, NoteField::Content(format!("draft {n}")));
        }
        store.flush();

        let persisted = decode_snapshot(&slot.blob().unwrap(), Locale::En, Utc::now()).unwrap();
        assert_eq!(persisted, store.notes(), "mode {mode:?}");
    }
}

#[test]
fn slots_with_different_keys_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.sqlite3");
    let work = SqliteSlot::open(&path, "work-notes").unwrap();
    let home = SqliteSlot::open(&path, "home-notes").unwrap();

    work.save("[]").unwrap();

    assert_eq!(work.key(), "work-notes");
    assert_eq!(work.load().unwrap().as_deref(), Some("[]"));
    assert_eq!(home.load().unwrap(), None);
}
