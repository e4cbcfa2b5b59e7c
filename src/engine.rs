//! Entry presentation engine
//!
//! Caller-facing API. Owns the scheduler, the session state machine, the
//! overlay surface and the dismissal coordinator, and is the only place
//! they are mutated. All calls must come from the engine's own context;
//! other threads go through an `EngineHandle`.

mod events;
mod handle;

pub use events::{DropReason, EngineEvent};
pub use handle::{Command, EngineHandle, SubmitReply};

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use crate::attributes::EntryAttributes;
use crate::clock::Clock;
use crate::config::Config;
use crate::dismissal::{DismissReason, DismissTarget, DismissalCoordinator, Gesture, TouchOutcome};
use crate::error::{EntryError, MountError};
use crate::overlay::{OverlayHost, OverlayManager, SurfaceHandle};
use crate::presentation::{AnimationTicket, Effect, Phase, SessionState, TimerToken, Transition};
use crate::renderable::RenderableRef;
use crate::request::{EntryId, EntryRequest};
use crate::scheduler::{Admission, Scheduler};

/// Successful result of `Engine::display`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Shown now, or next once the entry it preempted has exited.
    ///
    /// A preempting request is mounted only after the exit completes. If
    /// that mount fails the entry never appears and the failure is reported
    /// as `EngineEvent::MountFailed`, not through this result.
    Accepted(EntryId),
    /// Waiting in the pending queue
    Queued(EntryId),
    /// The same submission is already the active entry
    AlreadyDisplaying(EntryId),
}

impl SubmitOutcome {
    pub fn id(&self) -> EntryId {
        match self {
            SubmitOutcome::Accepted(id)
            | SubmitOutcome::Queued(id)
            | SubmitOutcome::AlreadyDisplaying(id) => *id,
        }
    }
}

pub struct Engine<H: OverlayHost> {
    scheduler: Scheduler,
    session: SessionState,
    overlay: OverlayManager<H>,
    dismissal: DismissalCoordinator,
    events: Vec<EngineEvent>,
    next_id: u64,
    commands: Receiver<Command>,
    command_tx: Sender<Command>,
}

impl<H: OverlayHost> Engine<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, &Config::default())
    }

    pub fn with_config(host: H, config: &Config) -> Self {
        let (command_tx, commands) = mpsc::channel();
        Self {
            scheduler: Scheduler::new(config.scheduler.max_priority_ties),
            session: SessionState::new(),
            overlay: OverlayManager::new(host),
            dismissal: DismissalCoordinator::default(),
            events: Vec::new(),
            next_id: 0,
            commands,
            command_tx,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.dismissal.set_clock(Box::new(clock));
        self
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle::new(self.command_tx.clone())
    }

    /// Submit an entry for display.
    ///
    /// Validation and policy rejections are returned here and leave the
    /// engine untouched. A mount failure of an entry that would be shown
    /// immediately is returned as well.
    pub fn display(
        &mut self,
        renderable: RenderableRef,
        attributes: EntryAttributes,
    ) -> Result<SubmitOutcome, EntryError> {
        attributes.validate()?;

        let admission = self
            .scheduler
            .admit(&renderable, &attributes, self.active_view());

        match admission {
            Admission::Duplicate(id) => {
                log::debug!("Entry {} is already displaying, ignoring resubmission", id);
                Ok(SubmitOutcome::AlreadyDisplaying(id))
            }
            Admission::Reject => {
                log::debug!("Dropped request: another entry is showing");
                Err(EntryError::RejectedByPolicy)
            }
            Admission::Enqueue => {
                let request = self.new_request(renderable, attributes);
                let id = request.id();
                log::debug!("Queued entry {} ({:?})", id, request.priority());
                self.scheduler.enqueue(request);
                self.events.push(EngineEvent::Queued(id));
                Ok(SubmitOutcome::Queued(id))
            }
            Admission::Preempt => {
                let request = self.new_request(renderable, attributes);
                let id = request.id();
                log::debug!("Entry {} preempts the active entry", id);
                self.scheduler.set_preemptor(request);
                self.begin_exit(DismissReason::Preempted);
                Ok(SubmitOutcome::Accepted(id))
            }
            Admission::ReplacePreemptor => {
                let request = self.new_request(renderable, attributes);
                let id = request.id();
                log::debug!("Entry {} outranks the waiting preemptor and takes its place", id);
                self.scheduler.set_preemptor(request);
                Ok(SubmitOutcome::Accepted(id))
            }
            Admission::Activate => {
                let request = self.new_request(renderable, attributes);
                let id = request.id();
                if let Err(error) = self.mount(&request) {
                    log::warn!("Entry {} failed to mount: {}", id, error);
                    self.settle_idle();
                    return Err(error.into());
                }
                self.enter(request);
                Ok(SubmitOutcome::Accepted(id))
            }
        }
    }

    /// Dismiss entries. Returns how many entries were affected.
    pub fn dismiss(&mut self, target: DismissTarget) -> usize {
        let dropped = match &target {
            DismissTarget::Active => Vec::new(),
            DismissTarget::All => self.scheduler.clear(),
            _ => self.scheduler.remove_where(|r| target.matches_pending(r)),
        };
        let mut affected = dropped.len();
        for request in dropped {
            log::debug!("Dropped pending entry {} ({:?})", request.id(), target);
            self.events.push(EngineEvent::Dropped {
                id: request.id(),
                reason: DropReason::Dismissed,
            });
        }

        let targets_active = self
            .session
            .active()
            .is_some_and(|active| target.matches_active(active));
        if targets_active && self.begin_exit(target.reason()) {
            affected += 1;
        }

        affected
    }

    /// Cancel a pending request. No-op once it became active.
    pub fn cancel(&mut self, id: EntryId) -> bool {
        match self.scheduler.cancel(id) {
            Some(request) => {
                self.events.push(EngineEvent::Dropped {
                    id: request.id(),
                    reason: DropReason::Cancelled,
                });
                true
            }
            None => false,
        }
    }

    /// Report a finished entrance or exit animation.
    /// Returns false when the ticket is stale.
    pub fn animation_finished(&mut self, ticket: AnimationTicket) -> bool {
        if !self.session.is_awaiting(ticket) {
            log::warn!("Ignoring stale animation completion {}", ticket);
            return false;
        }

        match self.session.phase() {
            Phase::EnteringCurrent => self.finish_entrance(ticket),
            Phase::ExitingCurrent => self.finish_exit(ticket),
            phase => {
                log::warn!("Animation completion {} in phase {:?}", ticket, phase);
                false
            }
        }
    }

    /// Report a display timer expiry. Returns false when the timer is no
    /// longer the armed one.
    pub fn timer_fired(&mut self, token: TimerToken) -> bool {
        match self.dismissal.on_timer_fired(&self.session, token) {
            Some(reason) => self.begin_exit(reason),
            None => {
                log::warn!("Ignoring stale timer {:?}", token);
                false
            }
        }
    }

    /// Fire the display timer if its deadline has passed
    pub fn tick(&mut self) -> bool {
        match self.dismissal.expired_timer(&self.session) {
            Some(token) => self.timer_fired(token),
            None => false,
        }
    }

    pub fn gesture(&mut self, gesture: Gesture) -> TouchOutcome {
        let resolution = self.dismissal.on_gesture(&self.session, gesture);
        if let Some(reason) = resolution.exit {
            self.begin_exit(reason);
        }
        resolution.outcome
    }

    /// Apply commands posted through `EngineHandle`s. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_recv() {
            self.apply_command(command);
            applied += 1;
        }
        applied
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_currently_displaying(&self) -> bool {
        self.session.phase() != Phase::Empty
    }

    pub fn is_displaying_named(&self, name: &str) -> bool {
        self.session
            .active()
            .is_some_and(|active| active.name() == Some(name))
    }

    pub fn queue_contains(&self, name: &str) -> bool {
        self.scheduler.contains_name(name)
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn active_id(&self) -> Option<EntryId> {
        self.session.active().map(EntryRequest::id)
    }

    pub fn pending_len(&self) -> usize {
        self.scheduler.len()
    }

    pub fn pending_ids(&self) -> Vec<EntryId> {
        self.scheduler.pending_ids()
    }

    pub fn current_ticket(&self) -> Option<AnimationTicket> {
        self.session.current_ticket()
    }

    pub fn armed_timer(&self) -> Option<TimerToken> {
        self.session.pending_timer().map(|t| t.token())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.pending_timer().map(|t| t.deadline())
    }

    pub fn surface(&self) -> Option<&SurfaceHandle> {
        self.overlay.surface()
    }

    pub fn host(&self) -> &H {
        self.overlay.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.overlay.host_mut()
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::Display {
                renderable,
                attributes,
                reply,
            } => {
                let result = self.display(renderable, attributes);
                if let Some(reply) = reply {
                    // The poster may have stopped listening
                    let _ = reply.send(result);
                }
            }
            Command::Dismiss(target) => {
                self.dismiss(target);
            }
            Command::Cancel(id) => {
                self.cancel(id);
            }
            Command::AnimationFinished(ticket) => {
                self.animation_finished(ticket);
            }
            Command::TimerFired(token) => {
                self.timer_fired(token);
            }
        }
    }

    fn active_view(&self) -> Option<(&EntryRequest, Phase)> {
        self.session
            .active()
            .map(|active| (active, self.session.phase()))
    }

    fn new_request(
        &mut self,
        renderable: RenderableRef,
        attributes: EntryAttributes,
    ) -> EntryRequest {
        self.next_id += 1;
        EntryRequest::new(
            EntryId::new(self.next_id),
            renderable,
            attributes,
            self.dismissal.now(),
            self.next_id,
        )
    }

    fn mount(&mut self, request: &EntryRequest) -> Result<(), MountError> {
        if request.renderable().preferred_size().is_empty() {
            return Err(MountError::ZeroSize);
        }

        let (surface, created) = self.overlay.ensure_surface();
        if created {
            self.events.push(EngineEvent::SurfaceCreated(surface.id()));
        }
        request.renderable().mount(&surface)
    }

    /// Empty -> EnteringCurrent for an already mounted request
    fn enter(&mut self, request: EntryRequest) {
        let renderable = request.renderable().clone();
        let animation = request.attributes().entrance_animation;
        let id = request.id();

        match self.session.apply(Transition::Enter(request)) {
            Ok(Effect::AnimateIn(ticket)) => {
                self.events.push(EngineEvent::WillAppear(id));
                renderable.animate_in(&animation, ticket);
            }
            Ok(effect) => log::warn!("Unexpected effect on enter: {:?}", effect),
            Err(e) => log::warn!("Could not enter entry {}: {}", id, e),
        }
    }

    fn finish_entrance(&mut self, ticket: AnimationTicket) -> bool {
        let timer = self
            .session
            .active()
            .and_then(|active| self.dismissal.arm(active.attributes().display_duration));

        match self
            .session
            .apply(Transition::EntranceFinished { ticket, timer })
        {
            Ok(Effect::Displayed {
                timer,
                deferred_exit,
            }) => {
                self.events.push(EngineEvent::DidAppear(ticket.entry()));
                if let Some(timer) = timer {
                    log::debug!("Armed display timer {:?} for {}", timer.token(), ticket.entry());
                }
                if let Some(reason) = deferred_exit {
                    self.begin_exit(reason);
                }
                true
            }
            Ok(effect) => {
                log::warn!("Unexpected effect on entrance completion: {:?}", effect);
                false
            }
            Err(e) => {
                log::warn!("Entrance completion rejected: {}", e);
                false
            }
        }
    }

    /// Request the active entry to leave. Returns false when there is
    /// nothing to exit or it is already exiting.
    fn begin_exit(&mut self, reason: DismissReason) -> bool {
        let Some((renderable, animation)) = self.session.active().map(|active| {
            (
                active.renderable().clone(),
                active.attributes().exit_animation,
            )
        }) else {
            return false;
        };

        match self.session.apply(Transition::Exit(reason)) {
            Ok(Effect::AnimateOut {
                ticket,
                reason,
                cancelled_timer,
            }) => {
                if let Some(token) = cancelled_timer {
                    log::debug!("Cancelled display timer {:?}", token);
                }
                self.events.push(EngineEvent::WillDisappear {
                    id: ticket.entry(),
                    reason,
                });
                renderable.animate_out(&animation, ticket);
                true
            }
            Ok(Effect::ExitDeferred(reason)) => {
                log::debug!("Exit ({}) deferred until the entrance completes", reason);
                true
            }
            Ok(effect) => {
                log::warn!("Unexpected effect on exit: {:?}", effect);
                false
            }
            Err(e) => {
                log::debug!("Exit ({}) ignored: {}", reason, e);
                false
            }
        }
    }

    /// ExitingCurrent -> Empty | EnteringCurrent
    fn finish_exit(&mut self, ticket: AnimationTicket) -> bool {
        if let Some(active) = self.session.active() {
            active.renderable().unmount();
        }

        let next = self.next_mountable();
        let effect = self
            .session
            .apply(Transition::ExitFinished { ticket, next });

        match effect {
            Ok(Effect::Exited {
                previous,
                reason,
                next,
            }) => {
                self.events.push(EngineEvent::DidDisappear {
                    id: previous.id(),
                    reason,
                });
                match next {
                    Some(next_ticket) => self.start_entrance(next_ticket),
                    None => self.settle_idle(),
                }
                true
            }
            Ok(effect) => {
                log::warn!("Unexpected effect on exit completion: {:?}", effect);
                false
            }
            Err(e) => {
                log::warn!("Exit completion rejected: {}", e);
                false
            }
        }
    }

    /// Pop pending requests until one mounts. Failures are reported and skipped.
    fn next_mountable(&mut self) -> Option<EntryRequest> {
        while let Some(candidate) = self.scheduler.next() {
            match self.mount(&candidate) {
                Ok(()) => return Some(candidate),
                Err(error) => {
                    log::warn!("Entry {} failed to mount: {}", candidate.id(), error);
                    self.events.push(EngineEvent::MountFailed {
                        id: candidate.id(),
                        error,
                    });
                }
            }
        }
        None
    }

    fn start_entrance(&mut self, ticket: AnimationTicket) {
        let Some((renderable, animation)) = self.session.active().map(|active| {
            (
                active.renderable().clone(),
                active.attributes().entrance_animation,
            )
        }) else {
            return;
        };

        self.events.push(EngineEvent::WillAppear(ticket.entry()));
        renderable.animate_in(&animation, ticket);
    }

    /// Tear the surface down when nothing is active or pending
    fn settle_idle(&mut self) {
        if self.session.phase() != Phase::Empty || !self.scheduler.is_empty() {
            return;
        }
        if let Some(surface) = self.overlay.teardown() {
            self.events.push(EngineEvent::SurfaceTornDown(surface));
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
