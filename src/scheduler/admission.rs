use serde::Deserialize;

use crate::attributes::{EntryAttributes, Precedence, Priority};
use crate::presentation::Phase;
use crate::renderable::RenderableRef;
use crate::request::{EntryId, EntryRequest};

/// What happens when a `Max` request meets an active `Max` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// The newer `Max` request forces the older one out
    #[default]
    Preempt,
    /// Equal priorities always wait their turn
    Enqueue,
}

/// Scheduling decision for an incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Nothing is active, show it now
    Activate,
    /// Force the active entry out and show this one next
    Preempt,
    /// Take the place of the request waiting to follow an exiting entry
    ReplacePreemptor,
    /// Wait in the pending queue
    Enqueue,
    /// Same renderable and attributes as the active entry
    Duplicate(EntryId),
    /// Dropped because another entry is showing
    Reject,
}

/// Decide placement for an incoming request. Only the incoming priority and
/// precedence, plus the active entry's priority and phase, are consulted.
pub fn admit(
    renderable: &RenderableRef,
    attributes: &EntryAttributes,
    active: Option<(&EntryRequest, Phase)>,
    ties: TiePolicy,
) -> Admission {
    let Some((current, phase)) = active else {
        return Admission::Activate;
    };

    // Once the active entry is leaving, a resubmission is a new request
    if phase != Phase::ExitingCurrent && current.is_same_submission(renderable, attributes) {
        return Admission::Duplicate(current.id());
    }

    match attributes.precedence {
        Precedence::DropIfEntryShowing => Admission::Reject,
        Precedence::ReplaceIfLowerPriority
            if phase != Phase::ExitingCurrent
                && outranks(attributes.priority, current.priority(), ties) =>
        {
            Admission::Preempt
        }
        // An exiting entry is already on its way out, so the request just queues
        Precedence::ReplaceIfLowerPriority | Precedence::Enqueue => Admission::Enqueue,
    }
}

/// Whether an incoming request should take over from the request already
/// waiting to follow the exiting entry
pub fn displaces(attributes: &EntryAttributes, waiting: &EntryRequest, ties: TiePolicy) -> bool {
    attributes.precedence == Precedence::ReplaceIfLowerPriority
        && outranks(attributes.priority, waiting.priority(), ties)
}

fn outranks(incoming: Priority, active: Priority, ties: TiePolicy) -> bool {
    incoming > active
        || (incoming == Priority::Max && active == Priority::Max && ties == TiePolicy::Preempt)
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod admission_tests;
