use std::fmt;

use super::timer::{DisplayTimer, TimerToken};
use crate::dismissal::DismissReason;
use crate::error::TransitionError;
use crate::request::{EntryId, EntryRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Empty,
    EnteringCurrent,
    DisplayingCurrent,
    ExitingCurrent,
}

/// Identifies one entrance or exit animation. Completion reports carrying a
/// ticket other than the in-flight one are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationTicket {
    entry: EntryId,
    serial: u64,
}

impl AnimationTicket {
    pub fn entry(&self) -> EntryId {
        self.entry
    }
}

impl fmt::Display for AnimationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entry, self.serial)
    }
}

/// Events fed into the state machine
#[derive(Debug)]
pub enum Transition {
    /// Begin the entrance of an accepted request
    Enter(EntryRequest),
    /// The entrance animation completed; `timer` is armed unless an exit was deferred
    EntranceFinished {
        ticket: AnimationTicket,
        timer: Option<DisplayTimer>,
    },
    /// Leave the active entry
    Exit(DismissReason),
    /// The exit animation completed; `next` goes straight to `EnteringCurrent`
    ExitFinished {
        ticket: AnimationTicket,
        next: Option<EntryRequest>,
    },
}

impl Transition {
    fn name(&self) -> &'static str {
        match self {
            Transition::Enter(_) => "enter",
            Transition::EntranceFinished { .. } => "entrance-finished",
            Transition::Exit(_) => "exit",
            Transition::ExitFinished { .. } => "exit-finished",
        }
    }
}

/// What the caller of `SessionState::apply` must do next
#[derive(Debug)]
pub enum Effect {
    /// Run the active entry's entrance animation
    AnimateIn(AnimationTicket),
    /// Entry is now displaying. A deferred exit must be started right away.
    Displayed {
        timer: Option<DisplayTimer>,
        deferred_exit: Option<DismissReason>,
    },
    /// Run the active entry's exit animation
    AnimateOut {
        ticket: AnimationTicket,
        reason: DismissReason,
        cancelled_timer: Option<TimerToken>,
    },
    /// Exit recorded while the entrance is still running
    ExitDeferred(DismissReason),
    /// The previous entry is gone. `next` is the ticket of the new entrance, if any.
    Exited {
        previous: EntryRequest,
        reason: DismissReason,
        next: Option<AnimationTicket>,
    },
}

/// Per-surface session. Mutated only through `apply`.
#[derive(Debug)]
pub struct SessionState {
    phase: Phase,
    active: Option<EntryRequest>,
    pending_timer: Option<DisplayTimer>,
    animation: Option<AnimationTicket>,
    deferred_exit: Option<DismissReason>,
    exit_reason: Option<DismissReason>,
    next_serial: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Empty,
            active: None,
            pending_timer: None,
            animation: None,
            deferred_exit: None,
            exit_reason: None,
            next_serial: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active(&self) -> Option<&EntryRequest> {
        self.active.as_ref()
    }

    pub fn pending_timer(&self) -> Option<&DisplayTimer> {
        self.pending_timer.as_ref()
    }

    pub fn current_ticket(&self) -> Option<AnimationTicket> {
        self.animation
    }

    pub fn deferred_exit(&self) -> Option<DismissReason> {
        self.deferred_exit
    }

    /// Whether `ticket` is the animation the session is waiting on
    pub fn is_awaiting(&self, ticket: AnimationTicket) -> bool {
        self.animation == Some(ticket)
    }

    pub fn apply(&mut self, transition: Transition) -> Result<Effect, TransitionError> {
        let from = self.phase;
        let effect = match (from, transition) {
            (Phase::Empty, Transition::Enter(request)) => {
                let ticket = self.issue_ticket(request.id());
                self.active = Some(request);
                self.animation = Some(ticket);
                self.phase = Phase::EnteringCurrent;
                Effect::AnimateIn(ticket)
            }
            (Phase::EnteringCurrent, Transition::EntranceFinished { ticket, timer }) => {
                self.check_ticket(ticket)?;
                self.animation = None;
                self.phase = Phase::DisplayingCurrent;
                let deferred_exit = self.deferred_exit.take();
                self.pending_timer = if deferred_exit.is_some() { None } else { timer };
                Effect::Displayed {
                    timer: self.pending_timer,
                    deferred_exit,
                }
            }
            (Phase::EnteringCurrent, Transition::Exit(DismissReason::Preempted)) => {
                // Force-exit cancels the entrance instead of waiting for it
                self.start_exit(DismissReason::Preempted)?
            }
            (Phase::EnteringCurrent, Transition::Exit(reason)) => {
                let reason = *self.deferred_exit.get_or_insert(reason);
                Effect::ExitDeferred(reason)
            }
            (Phase::DisplayingCurrent, Transition::Exit(reason)) => self.start_exit(reason)?,
            (Phase::ExitingCurrent, Transition::ExitFinished { ticket, next }) => {
                self.check_ticket(ticket)?;
                let previous = self.active.take().ok_or(TransitionError::Invalid {
                    phase: from,
                    transition: "exit-finished",
                })?;
                let reason = self.exit_reason.take().unwrap_or(DismissReason::Manual);
                self.pending_timer = None;
                self.animation = None;

                let next = match next {
                    Some(request) => {
                        let ticket = self.issue_ticket(request.id());
                        self.active = Some(request);
                        self.animation = Some(ticket);
                        self.phase = Phase::EnteringCurrent;
                        Some(ticket)
                    }
                    None => {
                        self.phase = Phase::Empty;
                        None
                    }
                };

                Effect::Exited {
                    previous,
                    reason,
                    next,
                }
            }
            (phase, transition) => {
                return Err(TransitionError::Invalid {
                    phase,
                    transition: transition.name(),
                });
            }
        };

        log::debug!("Session transition {:?} -> {:?}", from, self.phase);
        Ok(effect)
    }

    fn start_exit(&mut self, reason: DismissReason) -> Result<Effect, TransitionError> {
        let id = self
            .active
            .as_ref()
            .map(EntryRequest::id)
            .ok_or(TransitionError::Invalid {
                phase: self.phase,
                transition: "exit",
            })?;

        let cancelled_timer = self.pending_timer.take().map(|t| t.token());
        let ticket = self.issue_ticket(id);
        self.deferred_exit = None;
        self.exit_reason = Some(reason);
        self.animation = Some(ticket);
        self.phase = Phase::ExitingCurrent;

        Ok(Effect::AnimateOut {
            ticket,
            reason,
            cancelled_timer,
        })
    }

    fn check_ticket(&self, ticket: AnimationTicket) -> Result<(), TransitionError> {
        if self.is_awaiting(ticket) {
            Ok(())
        } else {
            Err(TransitionError::StaleTicket(ticket))
        }
    }

    fn issue_ticket(&mut self, entry: EntryId) -> AnimationTicket {
        self.next_serial = self.next_serial.wrapping_add(1);
        AnimationTicket {
            entry,
            serial: self.next_serial,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
