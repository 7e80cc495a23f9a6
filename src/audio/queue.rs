//! The request FIFO.
//!
//! Unbounded, insertion-ordered, duplicates allowed. Synchronisation is the
//! owner's job; see `Jukebox`.

use std::collections::VecDeque;

use super::types::QueueEntry;

#[derive(Debug, Default)]
pub(crate) struct RequestQueue {
    entries: VecDeque<QueueEntry>,
}

impl RequestQueue {
    pub(crate) fn push(&mut self, entry: QueueEntry) {
        self.entries.push_back(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<QueueEntry> {
        self.entries.pop_front()
    }

    pub(crate) fn front(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn snapshot(&self) -> Vec<QueueEntry> {
        self.entries.iter().cloned().collect()
    }
}
