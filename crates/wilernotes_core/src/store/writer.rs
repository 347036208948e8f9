//! Snapshot write scheduling.
//!
//! # Responsibility
//! - Apply encoded snapshots to the slot, inline or on one writer thread.
//! - Track write outcomes so shells can surface non-blocking warnings.
//!
//! # Invariants
//! - Snapshots reach the slot in dispatch order; the last dispatched wins.
//! - Save failures are counted and logged, never propagated to the store.
//! - `flush` returns only after every earlier snapshot was attempted.

use crate::slot::SnapshotSlot;
use log::{debug, error, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Instant;

const WRITER_THREAD_NAME: &str = "wilernotes-snapshot-writer";

type SharedSlot = Arc<Mutex<Box<dyn SnapshotSlot>>>;

/// How scheduled snapshots reach the slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Save synchronously inside the mutating call.
    Inline,
    /// Hand snapshots to a single writer thread.
    #[default]
    Background,
}

impl WriteMode {
    /// Parses `inline|background` case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inline" | "sync" => Some(Self::Inline),
            "background" | "async" => Some(Self::Background),
            _ => None,
        }
    }
}

/// Outcome counters since the writer was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteCounts {
    pub writes_ok: u64,
    pub writes_failed: u64,
    /// Snapshots superseded by a newer one before they were written.
    pub coalesced: u64,
}

#[derive(Debug, Default)]
struct WriteStats {
    ok: AtomicU64,
    failed: AtomicU64,
    coalesced: AtomicU64,
}

enum WriterCommand {
    Save(String),
    Flush(Sender<()>),
}

enum Backend {
    Inline,
    Background {
        sender: Option<Sender<WriterCommand>>,
        handle: Option<JoinHandle<()>>,
    },
}

/// Owns the slot and applies snapshots to it.
pub struct SnapshotWriter {
    slot: SharedSlot,
    stats: Arc<WriteStats>,
    backend: Backend,
}

impl SnapshotWriter {
    /// Creates a writer; `Background` falls back to inline writes when the
    /// writer thread cannot be spawned.
    pub fn new(slot: Box<dyn SnapshotSlot>, mode: WriteMode) -> Self {
        let slot: SharedSlot = Arc::new(Mutex::new(slot));
        let stats = Arc::new(WriteStats::default());
        let backend = match mode {
            WriteMode::Inline => Backend::Inline,
            WriteMode::Background => spawn_background(&slot, &stats),
        };
        Self {
            slot,
            stats,
            backend,
        }
    }

    pub fn mode(&self) -> WriteMode {
        match self.backend {
            Backend::Inline => WriteMode::Inline,
            Backend::Background { .. } => WriteMode::Background,
        }
    }

    /// Schedules one full-collection snapshot. Fire-and-forget.
    pub fn schedule(&self, blob: String) {
        match &self.backend {
            Backend::Inline => write_blob(&self.slot, &self.stats, &blob),
            Backend::Background { sender, .. } => {
                let Some(sender) = sender else {
                    write_blob(&self.slot, &self.stats, &blob);
                    return;
                };
                if let Err(mpsc::SendError(WriterCommand::Save(blob))) =
                    sender.send(WriterCommand::Save(blob))
                {
                    warn!("event=snapshot_schedule module=store status=writer_gone fallback=inline");
                    write_blob(&self.slot, &self.stats, &blob);
                }
            }
        }
    }

    /// Blocks until every snapshot scheduled so far has been attempted.
    pub fn flush(&self) {
        let Backend::Background {
            sender: Some(sender),
            ..
        } = &self.backend
        else {
            return;
        };
        let (ack_sender, ack_receiver) = mpsc::channel();
        if sender.send(WriterCommand::Flush(ack_sender)).is_ok() {
            let _ = ack_receiver.recv();
        }
    }

    pub fn counts(&self) -> WriteCounts {
        WriteCounts {
            writes_ok: self.stats.ok.load(Ordering::Relaxed),
            writes_failed: self.stats.failed.load(Ordering::Relaxed),
            coalesced: self.stats.coalesced.load(Ordering::Relaxed),
        }
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        if let Backend::Background { sender, handle } = &mut self.backend {
            // Closing the channel lets the thread drain pending work and exit.
            drop(sender.take());
            if let Some(handle) = handle.take() {
                if handle.join().is_err() {
                    error!("event=snapshot_writer_stop module=store status=error reason=thread_panicked");
                }
            }
        }
    }
}

fn spawn_background(slot: &SharedSlot, stats: &Arc<WriteStats>) -> Backend {
    let (sender, receiver) = mpsc::channel();
    let thread_slot = Arc::clone(slot);
    let thread_stats = Arc::clone(stats);
    let spawned = std::thread::Builder::new()
        .name(WRITER_THREAD_NAME.to_string())
        .spawn(move || run_writer(&thread_slot, &thread_stats, &receiver));

    match spawned {
        Ok(handle) => Backend::Background {
            sender: Some(sender),
            handle: Some(handle),
        },
        Err(err) => {
            error!(
                "event=snapshot_writer_start module=store status=error fallback=inline error={err}"
            );
            Backend::Inline
        }
    }
}

fn run_writer(slot: &SharedSlot, stats: &WriteStats, receiver: &Receiver<WriterCommand>) {
    let mut pending: Option<String> = None;
    loop {
        let command = if pending.is_some() {
            match receiver.try_recv() {
                Ok(command) => Some(command),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
            }
        } else {
            match receiver.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            }
        };

        match command {
            Some(WriterCommand::Save(blob)) => {
                if pending.replace(blob).is_some() {
                    stats.coalesced.fetch_add(1, Ordering::Relaxed);
                }
            }
            Some(WriterCommand::Flush(ack)) => {
                if let Some(blob) = pending.take() {
                    write_blob(slot, stats, &blob);
                }
                let _ = ack.send(());
            }
            None => {
                if let Some(blob) = pending.take() {
                    write_blob(slot, stats, &blob);
                }
            }
        }
    }
}

fn write_blob(slot: &SharedSlot, stats: &WriteStats, blob: &str) {
    let started_at = Instant::now();
    let guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    match guard.save(blob) {
        Ok(()) => {
            stats.ok.fetch_add(1, Ordering::Relaxed);
            debug!(
                "event=snapshot_write module=store status=ok bytes={} duration_ms={}",
                blob.len(),
                started_at.elapsed().as_millis()
            );
        }
        Err(err) => {
            stats.failed.fetch_add(1, Ordering::Relaxed);
            warn!(
                "event=snapshot_write module=store status=error bytes={} duration_ms={} error={}",
                blob.len(),
                started_at.elapsed().as_millis(),
                err
            );
        }
    }
}
