use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::attributes::{EntryAttributes, Priority};
use crate::renderable::RenderableRef;

/// Identifier assigned to every admitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A renderable paired with its attributes. Immutable once submitted.
#[derive(Clone)]
pub struct EntryRequest {
    id: EntryId,
    renderable: RenderableRef,
    attributes: EntryAttributes,
    submitted_at: Instant,
    /// Arrival order, breaks ties between equal priorities
    seq: u64,
}

impl EntryRequest {
    pub(crate) fn new(
        id: EntryId,
        renderable: RenderableRef,
        attributes: EntryAttributes,
        submitted_at: Instant,
        seq: u64,
    ) -> Self {
        Self {
            id,
            renderable,
            attributes,
            submitted_at,
            seq,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn renderable(&self) -> &RenderableRef {
        &self.renderable
    }

    pub fn attributes(&self) -> &EntryAttributes {
        &self.attributes
    }

    pub fn priority(&self) -> Priority {
        self.attributes.priority
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.name.as_deref()
    }

    pub fn submitted_at(&self) -> Instant {
        self.submitted_at
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Identity check used to make resubmission of the active entry idempotent
    pub fn is_same_submission(
        &self,
        renderable: &RenderableRef,
        attributes: &EntryAttributes,
    ) -> bool {
        Arc::ptr_eq(&self.renderable, renderable) && &self.attributes == attributes
    }
}

impl fmt::Debug for EntryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryRequest")
            .field("id", &self.id)
            .field("name", &self.attributes.name)
            .field("priority", &self.attributes.priority)
            .field("precedence", &self.attributes.precedence)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}
