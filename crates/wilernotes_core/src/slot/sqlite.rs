//! SQLite-backed key/value slot.
//!
//! # Invariants
//! - One row per key in `kv_slots`; saves upsert that row.
//! - The connection handed in must already be migrated (`db::open_db`).

use super::{SlotResult, SnapshotSlot};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Slot name used by the notes application.
pub const DEFAULT_SLOT_KEY: &str = "wiler-notes-data";

/// Durable slot stored as one row of `kv_slots`.
pub struct SqliteSlot {
    conn: Connection,
    key: String,
}

impl SqliteSlot {
    /// Wraps a migrated connection.
    pub fn new(conn: Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Opens (and migrates) the database at `path`.
    pub fn open(path: impl AsRef<Path>, key: impl Into<String>) -> SlotResult<Self> {
        Ok(Self::new(open_db(path)?, key))
    }

    pub fn open_in_memory(key: impl Into<String>) -> SlotResult<Self> {
        Ok(Self::new(open_db_in_memory()?, key))
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SnapshotSlot for SqliteSlot {
    fn load(&self) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, blob: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key, blob, now_epoch_ms()],
        )?;
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
