use std::collections::VecDeque;

use crate::request::{EntryId, EntryRequest};

/// Stable priority queue: highest priority first, arrival order within a
/// priority. Kept sorted on insert so iteration order is display order.
#[derive(Debug, Default)]
pub struct PendingQueue {
    entries: VecDeque<EntryRequest>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: EntryRequest) {
        // After every entry of equal or higher priority, so FIFO within a priority.
        // Sequence numbers keep a re-inserted older request ahead of newer peers.
        let index = self.entries.partition_point(|queued| {
            queued.priority() > request.priority()
                || (queued.priority() == request.priority() && queued.seq() < request.seq())
        });
        self.entries.insert(index, request);
    }

    pub fn pop(&mut self) -> Option<EntryRequest> {
        self.entries.pop_front()
    }

    pub fn peek(&self) -> Option<&EntryRequest> {
        self.entries.front()
    }

    pub fn remove(&mut self, id: EntryId) -> Option<EntryRequest> {
        let index = self.entries.iter().position(|r| r.id() == id)?;
        self.entries.remove(index)
    }

    pub fn remove_where(
        &mut self,
        mut pred: impl FnMut(&EntryRequest) -> bool,
    ) -> Vec<EntryRequest> {
        let mut removed = Vec::new();
        let mut kept = VecDeque::with_capacity(self.entries.len());
        for request in self.entries.drain(..) {
            if pred(&request) {
                removed.push(request);
            } else {
                kept.push_back(request);
            }
        }
        self.entries = kept;
        removed
    }

    pub fn drain(&mut self) -> impl Iterator<Item = EntryRequest> + '_ {
        self.entries.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryRequest> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod queue_tests;
