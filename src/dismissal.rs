//! Dismissal coordination
//!
//! Turns timer expiry, gestures and API calls into a single exit request
//! for the state machine, and issues the display timers it later checks
//! expiry reports against.

use std::fmt;
use std::time::Instant;

use serde::Deserialize;

use crate::attributes::{DismissTrigger, DisplayDuration, Priority, ScreenInteraction};
use crate::clock::{Clock, SystemClock};
use crate::presentation::{DisplayTimer, Phase, SessionState, TimerToken};
use crate::request::{EntryId, EntryRequest};

/// Why an entry left the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    Timeout,
    Manual,
    TapInside,
    TapOutside,
    Swipe,
    Preempted,
    DismissAll,
}

impl fmt::Display for DismissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DismissReason::Timeout => "timeout",
            DismissReason::Manual => "manual",
            DismissReason::TapInside => "tap inside",
            DismissReason::TapOutside => "tap outside",
            DismissReason::Swipe => "swipe",
            DismissReason::Preempted => "preempted",
            DismissReason::DismissAll => "dismiss all",
        };
        f.write_str(label)
    }
}

/// What a `dismiss` call applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DismissTarget {
    /// The entry currently on screen
    Active,
    /// The active entry and everything pending
    All,
    /// Pending entries only
    Enqueued,
    Specific(EntryId),
    Named(String),
    /// Every entry, active or pending, at or below the given priority
    PrioritizedAtMost(Priority),
}

impl DismissTarget {
    /// Whether a pending request is removed by this target
    pub fn matches_pending(&self, request: &EntryRequest) -> bool {
        match self {
            DismissTarget::Active => false,
            DismissTarget::All | DismissTarget::Enqueued => true,
            DismissTarget::Specific(id) => request.id() == *id,
            DismissTarget::Named(name) => request.name() == Some(name.as_str()),
            DismissTarget::PrioritizedAtMost(priority) => request.priority() <= *priority,
        }
    }

    /// Whether the active request is sent out by this target
    pub fn matches_active(&self, request: &EntryRequest) -> bool {
        match self {
            DismissTarget::Active | DismissTarget::All => true,
            DismissTarget::Enqueued => false,
            other => other.matches_pending(request),
        }
    }

    pub fn reason(&self) -> DismissReason {
        match self {
            DismissTarget::All => DismissReason::DismissAll,
            _ => DismissReason::Manual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchLocation {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap(TouchLocation),
    Swipe,
}

/// Where a touch ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// The touch dismissed the active entry
    Dismissed,
    /// The overlay swallowed the touch
    Consumed,
    /// The touch goes to the application underneath
    PassedThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureResolution {
    pub outcome: TouchOutcome,
    pub exit: Option<DismissReason>,
}

impl GestureResolution {
    fn dismiss(reason: DismissReason) -> Self {
        Self {
            outcome: TouchOutcome::Dismissed,
            exit: Some(reason),
        }
    }

    fn just(outcome: TouchOutcome) -> Self {
        Self {
            outcome,
            exit: None,
        }
    }
}

pub struct DismissalCoordinator {
    clock: Box<dyn Clock>,
    next_token: u64,
}

impl DismissalCoordinator {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            next_token: 0,
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    /// Create the display timer for an entry about to display.
    /// Infinite durations get no timer, and neither do deadlines past what
    /// `Instant` can hold.
    pub fn arm(&mut self, duration: DisplayDuration) -> Option<DisplayTimer> {
        let duration = duration.as_duration()?;
        let Some(deadline) = self.clock.now().checked_add(duration) else {
            log::debug!("Display duration {:?} overflows the clock, arming no timer", duration);
            return None;
        };
        self.next_token = self.next_token.wrapping_add(1);
        Some(DisplayTimer::new(TimerToken::new(self.next_token), deadline))
    }

    /// Resolve an expiry report. Only the timer armed in the current
    /// `DisplayingCurrent` phase may dismiss.
    pub fn on_timer_fired(
        &self,
        session: &SessionState,
        token: TimerToken,
    ) -> Option<DismissReason> {
        let armed = session.pending_timer()?;
        (session.phase() == Phase::DisplayingCurrent && armed.token() == token)
            .then_some(DismissReason::Timeout)
    }

    /// Token of the armed timer if its deadline has passed
    pub fn expired_timer(&self, session: &SessionState) -> Option<TimerToken> {
        session
            .pending_timer()
            .filter(|timer| timer.is_expired(self.clock.now()))
            .map(DisplayTimer::token)
    }

    pub fn on_gesture(&self, session: &SessionState, gesture: Gesture) -> GestureResolution {
        let Some(active) = session.active() else {
            return GestureResolution::just(TouchOutcome::PassedThrough);
        };

        let attrs = active.attributes();
        // Gestures are only armed once the entrance has completed
        let armed = session.phase() == Phase::DisplayingCurrent;
        let allows = |trigger| armed && attrs.dismiss_policy.allows(trigger);

        match gesture {
            Gesture::Tap(TouchLocation::Outside) => match attrs.screen_interaction {
                ScreenInteraction::PassThroughTouches => {
                    GestureResolution::just(TouchOutcome::PassedThrough)
                }
                ScreenInteraction::AbsorbTouches if allows(DismissTrigger::TapOutside) => {
                    GestureResolution::dismiss(DismissReason::TapOutside)
                }
                ScreenInteraction::AbsorbTouches => GestureResolution::just(TouchOutcome::Consumed),
            },
            Gesture::Tap(TouchLocation::Inside) => {
                if active.renderable().passes_touches_through() {
                    GestureResolution::just(TouchOutcome::PassedThrough)
                } else if allows(DismissTrigger::TapInside) {
                    GestureResolution::dismiss(DismissReason::TapInside)
                } else {
                    GestureResolution::just(TouchOutcome::Consumed)
                }
            }
            Gesture::Swipe => {
                if allows(DismissTrigger::Swipe) {
                    GestureResolution::dismiss(DismissReason::Swipe)
                } else {
                    GestureResolution::just(TouchOutcome::Consumed)
                }
            }
        }
    }
}

impl Default for DismissalCoordinator {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

#[cfg(test)]
#[path = "dismissal_tests.rs"]
mod dismissal_tests;
