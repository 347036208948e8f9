use super::{SlotError, SlotResult, SnapshotSlot};
use std::sync::{Arc, Mutex, MutexGuard};

/// In-process slot; clones share the same cell.
///
/// Used for ephemeral sessions and tests. `set_failing(true)` makes every
/// call fail so write-failure paths can be exercised.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    inner: Arc<Mutex<MemoryCell>>,
}

#[derive(Debug, Default)]
struct MemoryCell {
    blob: Option<String>,
    failing: bool,
    saves: usize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with `blob`.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let slot = Self::default();
        slot.cell().blob = Some(blob.into());
        slot
    }

    /// Current blob without going through the `SnapshotSlot` contract.
    pub fn blob(&self) -> Option<String> {
        self.cell().blob.clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.cell().saves
    }

    pub fn set_failing(&self, failing: bool) {
        self.cell().failing = failing;
    }

    fn cell(&self) -> MutexGuard<'_, MemoryCell> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotSlot for MemorySlot {
    fn load(&self) -> SlotResult<Option<String>> {
        let cell = self.cell();
        if cell.failing {
            return Err(SlotError::Unavailable("memory slot set to fail".to_string()));
        }
        Ok(cell.blob.clone())
    }

    fn save(&self, blob: &str) -> SlotResult<()> {
        let mut cell = self.cell();
        if cell.failing {
            return Err(SlotError::Unavailable("memory slot set to fail".to_string()));
        }
        cell.blob = Some(blob.to_string());
        cell.saves += 1;
        Ok(())
    }
}
