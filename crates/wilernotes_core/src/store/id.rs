use crate::model::note::{Note, NoteId};
use std::collections::HashSet;

/// Issues time-derived note ids that increase until `i64::MAX` is reached.
///
/// The first candidate is the wall clock in epoch milliseconds; it is bumped
/// past the last issued id (or the largest loaded id) so rapid creates and
/// snapshots written by a clock running ahead never collide.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    /// Starts above every id already present in `notes`.
    pub fn above(notes: &[Note]) -> Self {
        Self {
            last: notes.iter().map(|note| note.id.get()).max().unwrap_or(0),
        }
    }

    /// Issues the next id not present in `live`.
    ///
    /// Once the counter has reached `i64::MAX` the clock can no longer move it,
    /// so the smallest positive id unused by `live` is handed out instead.
    pub fn next(&mut self, now_epoch_ms: i64, live: &[Note]) -> NoteId {
        match self.last.checked_add(1) {
            Some(bumped) => {
                let candidate = now_epoch_ms.max(bumped);
                self.last = candidate;
                NoteId(candidate)
            }
            None => lowest_free(live),
        }
    }
}

fn lowest_free(live: &[Note]) -> NoteId {
    let taken: HashSet<i64> = live.iter().map(|note| note.id.get()).collect();
    // A collection of `live.len()` notes leaves one of 1..=len+1 free.
    let free = (1..)
        .take(live.len() + 1)
        .find(|id| !taken.contains(id))
        .unwrap_or(1);
    NoteId(free)
}

#[cfg(test)]
mod tests {
    use super::IdAllocator;
    use crate::model::note::{Note, NoteId};
    use chrono::Utc;

    #[test]
    fn same_millisecond_still_yields_distinct_ids() {
        let mut ids = IdAllocator::default();
        let first = ids.next(1_000, &[]);
        let second = ids.next(1_000, &[]);
        let third = ids.next(999, &[]);
        assert_eq!(first, NoteId(1_000));
        assert_eq!(second, NoteId(1_001));
        assert_eq!(third, NoteId(1_002));
    }

    #[test]
    fn starts_above_loaded_ids() {
        let notes = vec![
            Note::new(NoteId(5_000), "", "", "", Utc::now()),
            Note::new(NoteId(1), "", "", "", Utc::now()),
        ];
        let mut ids = IdAllocator::above(&notes);
        assert_eq!(ids.next(10, &notes), NoteId(5_001));
    }

    #[test]
    fn exhausted_counter_reuses_lowest_free_id() {
        let notes = vec![
            Note::new(NoteId(i64::MAX), "", "", "", Utc::now()),
            Note::new(NoteId(1), "", "", "", Utc::now()),
            Note::new(NoteId(3), "", "", "", Utc::now()),
        ];
        let mut ids = IdAllocator::above(&notes);
        assert_eq!(ids.next(10, &notes), NoteId(2));
    }
}
