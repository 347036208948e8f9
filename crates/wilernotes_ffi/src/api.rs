//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note collection, appearance and window-control use-cases to Dart.
//! - Keep one `NoteStore` session per process behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Arguments are primitives; results are plain envelopes with `ok` + `message`.
//! - Appearance and window calls never touch note state.

use chrono::Local;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use wilernotes_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, list_items,
    note_detail as note_detail_inner, ping as ping_inner, relay_window_control, Appearance,
    NoteField, NoteId, NoteStore, StoreConfig, Theme, WindowHost,
};

static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();

struct Session {
    db_path: PathBuf,
    store: NoteStore,
    appearance: Appearance,
    window: ShellWindow,
}

impl Session {
    fn open(config: &StoreConfig) -> Self {
        if let (Some(log_dir), Some(level)) = (&config.log_dir, &config.log_level) {
            if let Err(err) = init_logging_inner(level, log_dir) {
                warn!("event=session_open module=ffi status=logging_skipped error={err}");
            }
        }
        Self {
            db_path: config.db_path.clone(),
            store: config.open_store(),
            appearance: Appearance::default(),
            window: ShellWindow::default(),
        }
    }
}

/// Window state mirrored from the host; the relay records what the Dart
/// side must execute.
#[derive(Default)]
struct ShellWindow {
    maximized: bool,
    pending: Option<&'static str>,
}

impl WindowHost for ShellWindow {
    fn close(&mut self) {
        self.pending = Some("close");
    }

    fn minimize(&mut self) {
        self.pending = Some("minimize");
    }

    fn maximize(&mut self) {
        self.maximized = true;
        self.pending = Some("maximize");
    }

    fn unmaximize(&mut self) {
        self.maximized = false;
        self.pending = Some("unmaximize");
    }

    fn is_maximized(&self) -> bool {
        self.maximized
    }
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// List row returned to the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub date_label: String,
    pub preview: String,
    pub selected: bool,
}

/// Filtered list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub items: Vec<NoteItem>,
    pub selected_id: Option<i64>,
    pub message: String,
}

/// Editor projection of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetailResponse {
    pub ok: bool,
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub folder: String,
    pub date_label: String,
    pub char_count: u32,
    pub message: String,
}

impl NoteDetailResponse {
    fn missing(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            title: String::new(),
            content: String::new(),
            folder: String::new(),
            date_label: String::new(),
            char_count: 0,
            message: message.into(),
        }
    }
}

/// Generic mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Note affected by the action, when any.
    pub note_id: Option<i64>,
    /// Selection after the action.
    pub selected_id: Option<i64>,
    pub message: String,
}

/// Current appearance and its style tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceResponse {
    pub ok: bool,
    pub theme_key: String,
    pub theme_name: String,
    pub dark: bool,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub accent: String,
    pub available_themes: Vec<String>,
    pub message: String,
}

/// Host command the shell must run for a window-control request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowControlResponse {
    pub ok: bool,
    /// `close|minimize|maximize|unmaximize`, empty on rejection.
    pub command: String,
    pub message: String,
}

/// Opens the notes session.
///
/// `db_path` overrides `WILERNOTES_DB_PATH` for this process. Once a session
/// is open, calling again with no path or the same path is a no-op; a
/// different path is rejected because the open store cannot be swapped.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_init(db_path: Option<String>) -> NoteActionResponse {
    let requested = db_path
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);
    let mut opened_now = false;
    SESSION.get_or_init(|| {
        opened_now = true;
        let mut config = StoreConfig::from_env();
        if let Some(path) = &requested {
            config.db_path = path.clone();
        }
        info!(
            "event=session_open module=ffi status=start path={}",
            config.db_path.display()
        );
        Mutex::new(Session::open(&config))
    });

    let session = lock_session();
    let selected_id = session.store.selected_id().map(NoteId::get);
    if opened_now {
        return NoteActionResponse {
            ok: true,
            note_id: None,
            selected_id,
            message: format!("Session opened ({:?}).", session.store.load_outcome()),
        };
    }

    match requested {
        Some(path) if path != session.db_path => {
            warn!(
                "event=session_open module=ffi status=rejected requested={} open={}",
                path.display(),
                session.db_path.display()
            );
            NoteActionResponse {
                ok: false,
                note_id: None,
                selected_id,
                message: format!(
                    "Session already open on {}; cannot switch to {}.",
                    session.db_path.display(),
                    path.display()
                ),
            }
        }
        _ => NoteActionResponse {
            ok: true,
            note_id: None,
            selected_id,
            message: "Session already open.".to_string(),
        },
    }
}

/// Lists notes matching `query` (case-insensitive, title or content).
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(query: String) -> NotesListResponse {
    let session = lock_session();
    let store = &session.store;
    let items = list_items(
        store.notes(),
        store.selected_id(),
        query.as_str(),
        &Local::now(),
        store.locale(),
    )
    .into_iter()
    .map(|item| NoteItem {
        id: item.id.get(),
        title: item.title,
        date_label: item.date_label,
        preview: item.preview,
        selected: item.selected,
    })
    .collect::<Vec<_>>();

    NotesListResponse {
        message: format!("{} of {} note(s).", items.len(), store.notes().len()),
        items,
        selected_id: store.selected_id().map(NoteId::get),
    }
}

/// Creates a blank note and selects it.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create() -> NoteActionResponse {
    let mut session = lock_session();
    let created = session.store.create();
    NoteActionResponse {
        ok: true,
        note_id: Some(created.id.get()),
        selected_id: session.store.selected_id().map(NoteId::get),
        message: "Note created.".to_string(),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_update_title(id: i64, title: String) -> NoteActionResponse {
    update_field(id, NoteField::Title(title))
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_update_content(id: i64, content: String) -> NoteActionResponse {
    update_field(id, NoteField::Content(content))
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_update_folder(id: i64, folder: String) -> NoteActionResponse {
    update_field(id, NoteField::Folder(folder))
}

/// Deletes a note; the response carries the resulting selection.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: i64) -> NoteActionResponse {
    let mut session = lock_session();
    let existed = session.store.get(NoteId(id)).is_some();
    let selected = session.store.delete(NoteId(id));
    NoteActionResponse {
        ok: existed,
        note_id: Some(id),
        selected_id: selected.map(NoteId::get),
        message: if existed {
            "Note deleted.".to_string()
        } else {
            format!("note not found: {id}")
        },
    }
}

/// Selects a note and returns its editor projection.
#[flutter_rust_bridge::frb(sync)]
pub fn note_select(id: i64) -> NoteDetailResponse {
    let mut session = lock_session();
    let locale = session.store.locale();
    match session.store.select(NoteId(id)) {
        Some(note) => to_detail_response(note_detail_inner(note, &Local::now(), locale)),
        None => NoteDetailResponse::missing(format!("note not found: {id}")),
    }
}

/// Editor projection of `id`, or of the current selection when `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_detail(id: Option<i64>) -> NoteDetailResponse {
    let session = lock_session();
    let store = &session.store;
    let note = match id {
        Some(id) => store.get(NoteId(id)),
        None => store.selected(),
    };
    match note {
        Some(note) => to_detail_response(note_detail_inner(note, &Local::now(), store.locale())),
        None => NoteDetailResponse::missing("no note selected"),
    }
}

/// Waits for pending snapshot writes; reports failed writes as a warning.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_flush() -> NoteActionResponse {
    let session = lock_session();
    session.store.flush();
    let counts = session.store.write_counts();
    NoteActionResponse {
        ok: counts.writes_failed == 0,
        note_id: None,
        selected_id: session.store.selected_id().map(NoteId::get),
        message: format!(
            "writes_ok={} writes_failed={} coalesced={}",
            counts.writes_ok, counts.writes_failed, counts.coalesced
        ),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn appearance_get() -> AppearanceResponse {
    let session = lock_session();
    to_appearance_response(session.appearance, true, String::new())
}

/// Switches theme by key or display name; unknown names leave it unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn appearance_set_theme(theme: String) -> AppearanceResponse {
    let mut session = lock_session();
    match Theme::parse(theme.as_str()) {
        Some(parsed) => {
            session.appearance.theme = parsed;
            to_appearance_response(session.appearance, true, String::new())
        }
        None => to_appearance_response(
            session.appearance,
            false,
            format!("unknown theme `{}`", theme.trim()),
        ),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn appearance_toggle_dark() -> AppearanceResponse {
    let mut session = lock_session();
    session.appearance.toggle_dark();
    to_appearance_response(session.appearance, true, String::new())
}

/// Validates a window action and returns the host command to run.
///
/// `maximize` alternates with `unmaximize` based on the tracked state.
#[flutter_rust_bridge::frb(sync)]
pub fn window_control(action: String) -> WindowControlResponse {
    let mut session = lock_session();
    let window = &mut session.window;
    window.pending = None;
    match relay_window_control(&mut *window, action.as_str()) {
        Ok(control) => WindowControlResponse {
            ok: true,
            command: window.pending.unwrap_or(control.as_str()).to_string(),
            message: String::new(),
        },
        Err(err) => WindowControlResponse {
            ok: false,
            command: String::new(),
            message: err.to_string(),
        },
    }
}

fn update_field(id: i64, field: NoteField) -> NoteActionResponse {
    let mut session = lock_session();
    match session.store.update(NoteId(id), field) {
        Some(updated) => NoteActionResponse {
            ok: true,
            note_id: Some(updated.id.get()),
            selected_id: session.store.selected_id().map(NoteId::get),
            message: "Note updated.".to_string(),
        },
        None => NoteActionResponse {
            ok: false,
            note_id: Some(id),
            selected_id: session.store.selected_id().map(NoteId::get),
            message: format!("note not found: {id}"),
        },
    }
}

fn lock_session() -> MutexGuard<'static, Session> {
    let session = SESSION.get_or_init(|| Mutex::new(Session::open(&StoreConfig::from_env())));
    session.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn to_detail_response(detail: wilernotes_core::NoteDetail) -> NoteDetailResponse {
    NoteDetailResponse {
        ok: true,
        id: Some(detail.id.get()),
        title: detail.title,
        content: detail.content,
        folder: detail.folder,
        date_label: detail.date_label,
        char_count: u32::try_from(detail.char_count).unwrap_or(u32::MAX),
        message: String::new(),
    }
}

fn to_appearance_response(appearance: Appearance, ok: bool, message: String) -> AppearanceResponse {
    let palette = appearance.theme.palette();
    AppearanceResponse {
        ok,
        theme_key: appearance.theme.key().to_string(),
        theme_name: appearance.theme.display_name().to_string(),
        dark: appearance.dark,
        background: palette.background.to_string(),
        surface: appearance.surface().to_string(),
        text: appearance.text().to_string(),
        accent: palette.accent.to_string(),
        available_themes: Theme::ALL
            .iter()
            .map(|theme| theme.display_name().to_string())
            .collect(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        appearance_get, appearance_set_theme, appearance_toggle_dark, core_version, init_logging,
        note_create, note_delete, note_detail, note_select, note_update_content,
        note_update_title, notes_flush, notes_init, notes_list, ping, window_control,
    };
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEST_DB: OnceLock<String> = OnceLock::new();

    fn init_test_session() -> &'static str {
        TEST_DB.get_or_init(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time went backwards")
                .as_nanos();
            let path = std::env::temp_dir().join(format!(
                "wilernotes-ffi-{}-{nanos}.sqlite3",
                std::process::id()
            ));
            let path = path.to_string_lossy().into_owned();
            let response = notes_init(Some(path.clone()));
            assert!(response.ok, "{}", response.message);
            path
        })
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn created_note_is_listed_searchable_and_editable() {
        init_test_session();
        let created = note_create();
        assert!(created.ok, "{}", created.message);
        let id = created.note_id.expect("create should return note_id");

        let token = format!("token-{id}");
        assert!(note_update_title(id, format!("Title {token}")).ok);
        assert!(note_update_content(id, format!("# Heading {token}")).ok);

        let listed = notes_list(token.to_uppercase());
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].id, id);
        assert_eq!(listed.items[0].preview, format!("Heading {token}"));

        let detail = note_detail(Some(id));
        assert!(detail.ok);
        assert_eq!(detail.char_count as usize, format!("# Heading {token}").chars().count());
        assert_eq!(detail.date_label, "just now");

        assert!(notes_flush().ok);
    }

    #[test]
    fn select_and_delete_report_selection() {
        init_test_session();
        let id = note_create().note_id.expect("note id");

        let selected = note_select(id);
        assert!(selected.ok);
        assert_eq!(selected.id, Some(id));

        let deleted = note_delete(id);
        assert!(deleted.ok);
        assert_ne!(deleted.selected_id, Some(id));

        let again = note_delete(id);
        assert!(!again.ok);
        assert!(again.message.contains("not found"));
        assert!(!note_select(id).ok);
    }

    #[test]
    fn updating_unknown_note_fails_softly() {
        init_test_session();
        let response = note_update_title(-42, "nope".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("not found"));
    }

    #[test]
    fn appearance_and_window_calls_round_trip() {
        init_test_session();
        let themed = appearance_set_theme("sonoma".to_string());
        assert!(themed.ok);
        assert_eq!(themed.theme_name, "Sonoma");
        assert!(!appearance_set_theme("aqua".to_string()).ok);
        assert_eq!(appearance_get().theme_key, "sonoma");
        let toggled = appearance_toggle_dark();
        assert_ne!(toggled.dark, appearance_toggle_dark().dark);

        let first = window_control("maximize".to_string());
        let second = window_control("maximize".to_string());
        assert!(first.ok && second.ok);
        assert_ne!(first.command, second.command);
        assert_eq!(window_control("minimize".to_string()).command, "minimize");
        assert!(!window_control("explode".to_string()).ok);
    }

    #[test]
    fn reinit_accepts_same_path_and_rejects_another() {
        let path = init_test_session();

        assert!(notes_init(None).ok);
        let same = notes_init(Some(path.to_string()));
        assert!(same.ok, "{}", same.message);
        assert_eq!(same.message, "Session already open.");

        let other = notes_init(Some(format!("{path}.other")));
        assert!(!other.ok);
        assert!(other.message.contains("cannot switch"));
    }
}
