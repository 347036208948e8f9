//! Environment-driven session configuration.
//!
//! # Responsibility
//! - Resolve database path, slot key, write mode, locale and log settings.
//! - Open a store from the resolved settings without ever failing.
//!
//! # Invariants
//! - Unknown or empty values fall back to defaults with a `warn` log.
//! - An unusable database degrades to an in-memory slot for the session.

use crate::locale::Locale;
use crate::slot::{MemorySlot, SqliteSlot, DEFAULT_SLOT_KEY};
use crate::store::{NoteStore, StoreOptions, WriteMode};
use log::warn;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "WILERNOTES_DB_PATH";
pub const WRITE_MODE_ENV: &str = "WILERNOTES_WRITE_MODE";
pub const LOCALE_ENV: &str = "WILERNOTES_LOCALE";
pub const LOG_DIR_ENV: &str = "WILERNOTES_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "WILERNOTES_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "wilernotes.sqlite3";

/// Resolved settings for one notes session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub slot_key: String,
    pub options: StoreOptions,
    /// Absolute directory for rolling logs; logging stays off when `None`.
    pub log_dir: Option<String>,
    pub log_level: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            options: StoreOptions::default(),
            log_dir: None,
            log_level: None,
        }
    }
}

impl StoreConfig {
    /// Reads `WILERNOTES_*` process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = value(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(raw) = value(WRITE_MODE_ENV) {
            match WriteMode::parse(&raw) {
                Some(mode) => config.options.write_mode = mode,
                None => warn!(
                    "event=config_resolve module=config status=ignored key={WRITE_MODE_ENV} value={raw}"
                ),
            }
        }
        if let Some(raw) = value(LOCALE_ENV) {
            match Locale::parse(&raw) {
                Some(locale) => config.options.locale = locale,
                None => warn!(
                    "event=config_resolve module=config status=ignored key={LOCALE_ENV} value={raw}"
                ),
            }
        }
        config.log_dir = value(LOG_DIR_ENV);
        config.log_level = value(LOG_LEVEL_ENV);
        config
    }

    /// Opens the configured database slot and initializes a store on it.
    ///
    /// Falls back to an in-memory slot when the database cannot be opened,
    /// so edits still work for the session but will not survive a restart.
    pub fn open_store(&self) -> NoteStore {
        match SqliteSlot::open(&self.db_path, self.slot_key.as_str()) {
            Ok(slot) => NoteStore::initialize(slot, self.options),
            Err(err) => {
                warn!(
                    "event=store_open module=config status=fallback slot=memory path={} error={}",
                    self.db_path.display(),
                    err
                );
                NoteStore::initialize(MemorySlot::new(), self.options)
            }
        }
    }
}
