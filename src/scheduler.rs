//! Pending entry scheduling
//!
//! Decides whether an incoming request is shown now, preempts the active
//! entry, waits in the pending queue or is rejected.

mod admission;
mod queue;

pub use admission::{Admission, TiePolicy, admit, displaces};
pub use queue::PendingQueue;

use crate::attributes::EntryAttributes;
use crate::presentation::Phase;
use crate::renderable::RenderableRef;
use crate::request::{EntryId, EntryRequest};

pub struct Scheduler {
    pending: PendingQueue,
    /// Request that forced the active entry out. Shown before anything pending.
    preemptor: Option<EntryRequest>,
    ties: TiePolicy,
}

impl Scheduler {
    pub fn new(ties: TiePolicy) -> Self {
        Self {
            pending: PendingQueue::new(),
            preemptor: None,
            ties,
        }
    }

    pub fn tie_policy(&self) -> TiePolicy {
        self.ties
    }

    pub fn admit(
        &self,
        renderable: &RenderableRef,
        attributes: &EntryAttributes,
        active: Option<(&EntryRequest, Phase)>,
    ) -> Admission {
        let admission = admit(renderable, attributes, active, self.ties);
        match (&admission, &self.preemptor) {
            (Admission::Enqueue, Some(waiting)) if displaces(attributes, waiting, self.ties) => {
                Admission::ReplacePreemptor
            }
            _ => admission,
        }
    }

    pub fn enqueue(&mut self, request: EntryRequest) {
        self.pending.push(request);
    }

    pub fn set_preemptor(&mut self, request: EntryRequest) {
        if let Some(previous) = self.preemptor.replace(request) {
            log::debug!(
                "Preemptor {} displaced by a newer one, moving it to the queue",
                previous.id()
            );
            self.pending.push(previous);
        }
    }

    /// Pop the request to show once the active entry has exited
    pub fn next(&mut self) -> Option<EntryRequest> {
        self.preemptor.take().or_else(|| self.pending.pop())
    }

    /// Drop every pending request without showing it
    pub fn clear(&mut self) -> Vec<EntryRequest> {
        let mut dropped: Vec<EntryRequest> = self.preemptor.take().into_iter().collect();
        dropped.extend(self.pending.drain());
        dropped
    }

    pub fn cancel(&mut self, id: EntryId) -> Option<EntryRequest> {
        if self.preemptor.as_ref().is_some_and(|r| r.id() == id) {
            return self.preemptor.take();
        }
        self.pending.remove(id)
    }

    pub fn remove_where(
        &mut self,
        mut pred: impl FnMut(&EntryRequest) -> bool,
    ) -> Vec<EntryRequest> {
        let mut removed = Vec::new();
        if self.preemptor.as_ref().is_some_and(&mut pred) {
            removed.extend(self.preemptor.take());
        }
        removed.extend(self.pending.remove_where(pred));
        removed
    }

    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.preemptor.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pending ids in the order they will be shown
    pub fn pending_ids(&self) -> Vec<EntryId> {
        self.preemptor
            .iter()
            .chain(self.pending.iter())
            .map(EntryRequest::id)
            .collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.preemptor
            .iter()
            .chain(self.pending.iter())
            .any(|r| r.name() == Some(name))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(TiePolicy::default())
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
