//! Recording window and the ordered log of recorded events.

use alloc::vec::Vec;
use lp_ir::{Event, LayerId, MusicalTime};

/// Bookkeeping for a recording in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordingWindow {
    /// Quantized time the first note was played (absolute)
    pub started_at: MusicalTime,
    /// Whole bars recorded so far
    pub bars: u32,
}

impl RecordingWindow {
    pub fn new(started_at: MusicalTime) -> Self {
        Self { started_at, bars: 0 }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    event: Event,
    /// Append order, used to find the newest start for `revoke_last`.
    seq: u32,
}

/// Recorded starts and stops, sorted by loop offset.
///
/// During playback, events are consumed via a cursor that advances forward
/// without removing elements, so replaying a pass never allocates.
#[derive(Clone, Debug, Default)]
pub struct RecordingLog {
    entries: Vec<Entry>,
    /// Next entry index to replay.
    cursor: usize,
    /// Time of the last `drain_until` in the current pass.
    drained: Option<MusicalTime>,
    next_seq: u32,
}

impl RecordingLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            drained: None,
            next_seq: 0,
        }
    }

    /// Append an event, keeping time order. Events at equal times keep
    /// append order.
    ///
    /// An event at or before the last drained time counts as already
    /// replayed for the current pass.
    pub fn push(&mut self, event: Event) {
        let pos = self.entries.partition_point(|e| e.event.time <= event.time);
        if self.drained.is_some_and(|t| event.time <= t) {
            self.cursor += 1;
        }
        self.entries.insert(
            pos,
            Entry {
                event,
                seq: self.next_seq,
            },
        );
        self.next_seq += 1;
    }

    /// Remove the most recently appended start together with its matching
    /// stop, if that stop was recorded. Returns the layer the start drove.
    pub fn revoke_last(&mut self) -> Option<LayerId> {
        let (index, start) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.event.is_start())
            .max_by_key(|(_, e)| e.seq)
            .map(|(i, e)| (i, *e))?;
        self.remove_at(index);

        let stop = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                !e.event.is_start() && e.event.layer == start.event.layer && e.seq > start.seq
            })
            .min_by_key(|(_, e)| e.seq)
            .map(|(i, _)| i);
        if let Some(index) = stop {
            self.remove_at(index);
        }

        Some(start.event.layer)
    }

    fn remove_at(&mut self, index: usize) {
        self.entries.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
    }

    /// Return the index range of events at or before `time` (cursor-based, zero allocation).
    ///
    /// Advances the internal cursor past all consumed events. The returned
    /// range can be used with `get`.
    pub fn drain_until(&mut self, time: MusicalTime) -> core::ops::Range<usize> {
        let start = self.cursor;
        self.drained = Some(time);
        while self.cursor < self.entries.len() {
            if self.entries[self.cursor].event.time <= time {
                self.cursor += 1;
            } else {
                break;
            }
        }
        start..self.cursor
    }

    /// Get an event by index (for use with `drain_until` ranges).
    pub fn get(&self, index: usize) -> Option<&Event> {
        self.entries.get(index).map(|e| &e.event)
    }

    /// Rewind for the next loop pass.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.drained = None;
    }

    /// Fold every event offset into a loop of `length` subdivisions,
    /// re-sort, and rewind.
    pub fn wrap_into(&mut self, length: u64) {
        if length == 0 {
            return;
        }
        for entry in &mut self.entries {
            let offset = entry.event.time.total_subdivisions() % length;
            entry.event.time = MusicalTime::from_subdivisions(offset);
        }
        self.entries.sort_by_key(|e| (e.event.time, e.seq));
        self.reset_cursor();
    }

    /// Clear all events and reset cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_cursor();
    }

    /// True if any event drives `layer`.
    pub fn references(&self, layer: LayerId) -> bool {
        self.entries.iter().any(|e| e.event.layer == layer)
    }

    /// Events in replay order.
    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.entries.iter().map(|e| &e.event)
    }

    /// Returns true if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of events in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
