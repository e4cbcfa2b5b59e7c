use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use super::script::{DismissKind, DisplayStep, Scenario, Step};
use super::view::{AnimationRequest, ScriptedView};
use crate::attributes::{EntryAttributes, Priority};
use crate::clock::{Clock, ManualClock};
use crate::config::Config;
use crate::dismissal::{DismissTarget, Gesture, TouchLocation, TouchOutcome};
use crate::engine::{DropReason, Engine, EngineEvent, SubmitOutcome};
use crate::error::ConfigError;
use crate::overlay::HeadlessHost;
use crate::presentation::AnimationTicket;
use crate::renderable::Size;
use crate::request::EntryId;

struct InFlight {
    ticket: AnimationTicket,
    done_at: Instant,
}

/// Drives an engine through a scenario on a virtual timeline
pub struct ScenarioRunner {
    engine: Engine<HeadlessHost>,
    clock: ManualClock,
    defaults: EntryAttributes,
    animation_tx: Sender<AnimationRequest>,
    animation_rx: Receiver<AnimationRequest>,
    in_flight: Vec<InFlight>,
    labels: HashMap<EntryId, String>,
    ids: HashMap<String, EntryId>,
    log: Vec<String>,
}

impl ScenarioRunner {
    pub fn new(config: &Config) -> Self {
        let clock = ManualClock::new();
        let engine = Engine::with_config(HeadlessHost::default(), config).with_clock(clock.clone());
        let (animation_tx, animation_rx) = mpsc::channel();
        Self {
            engine,
            clock,
            defaults: config.default_attributes(),
            animation_tx,
            animation_rx,
            in_flight: Vec::new(),
            labels: HashMap::new(),
            ids: HashMap::new(),
            log: Vec::new(),
        }
    }

    /// Replay every step and return the rendered log
    pub fn run(mut self, scenario: &Scenario) -> Result<Vec<String>, ConfigError> {
        for (index, step) in scenario.steps.iter().enumerate() {
            log::debug!("Step {}: {:?}", index + 1, step);
            self.step(step)?;
        }
        Ok(self.log)
    }

    pub fn engine(&self) -> &Engine<HeadlessHost> {
        &self.engine
    }

    fn step(&mut self, step: &Step) -> Result<(), ConfigError> {
        match step {
            Step::Display(display) => self.display(display),
            Step::Advance { seconds } => {
                let target = Duration::try_from_secs_f64(*seconds)
                    .ok()
                    .and_then(|step| self.clock.now().checked_add(step))
                    .ok_or_else(|| {
                        ConfigError::Scenario(format!(
                            "cannot advance the clock by {} seconds",
                            seconds
                        ))
                    })?;
                self.run_until(target);
            }
            Step::Tap { location } => {
                let what = match location {
                    TouchLocation::Inside => "tap inside",
                    TouchLocation::Outside => "tap outside",
                };
                let outcome = self.engine.gesture(Gesture::Tap(*location));
                self.note(format!("{}: {}", what, describe_touch(outcome)));
            }
            Step::Swipe => {
                let outcome = self.engine.gesture(Gesture::Swipe);
                self.note(format!("swipe: {}", describe_touch(outcome)));
            }
            Step::Dismiss {
                target,
                name,
                label,
                priority,
            } => {
                let target = self.dismiss_target(*target, name, label, *priority)?;
                let affected = self.engine.dismiss(target);
                log::debug!("Dismiss affected {} entries", affected);
            }
            Step::Cancel { label } => {
                let id = self.lookup(label)?;
                if !self.engine.cancel(id) {
                    self.note(format!("{}: not pending, cancel ignored", label));
                }
            }
        }
        self.record();
        Ok(())
    }

    fn display(&mut self, step: &DisplayStep) {
        let view = ScriptedView::new(
            Size::new(step.width, step.height),
            step.fail_mount,
            self.animation_tx.clone(),
        );
        let attributes = step.resolve(&self.defaults);

        match self.engine.display(Arc::new(view), attributes) {
            Ok(outcome) => {
                let id = outcome.id();
                self.labels.insert(id, step.label.clone());
                self.ids.insert(step.label.clone(), id);
                if let SubmitOutcome::AlreadyDisplaying(_) = outcome {
                    self.note(format!("{}: already displaying", step.label));
                }
            }
            Err(error) => {
                // Flush surface events first so the log stays in order
                self.record();
                self.note(format!("{}: {}", step.label, error));
            }
        }
    }

    fn dismiss_target(
        &self,
        kind: DismissKind,
        name: &Option<String>,
        label: &Option<String>,
        priority: Option<Priority>,
    ) -> Result<DismissTarget, ConfigError> {
        let missing = |field: &str| ConfigError::Scenario(format!("dismiss needs `{}`", field));
        Ok(match kind {
            DismissKind::Active => DismissTarget::Active,
            DismissKind::All => DismissTarget::All,
            DismissKind::Enqueued => DismissTarget::Enqueued,
            DismissKind::Named => DismissTarget::Named(name.clone().ok_or_else(|| missing("name"))?),
            DismissKind::Specific => {
                let label = label.as_deref().ok_or_else(|| missing("label"))?;
                DismissTarget::Specific(self.lookup(label)?)
            }
            DismissKind::PrioritizedAtMost => {
                DismissTarget::PrioritizedAtMost(priority.ok_or_else(|| missing("priority"))?)
            }
        })
    }

    fn lookup(&self, label: &str) -> Result<EntryId, ConfigError> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| ConfigError::Scenario(format!("no entry labelled `{}`", label)))
    }

    /// Complete animations and fire timers in time order up to `target`.
    /// Animations finishing at the same instant as a timer go first.
    fn run_until(&mut self, target: Instant) {
        loop {
            self.collect_animations();

            let next_animation = self
                .in_flight
                .iter()
                .enumerate()
                .min_by_key(|(index, anim)| (anim.done_at, *index))
                .map(|(index, anim)| (index, anim.done_at));
            let next_timer = self.engine.next_deadline();

            let due_animation = next_animation.filter(|(_, at)| {
                *at <= target && next_timer.is_none_or(|deadline| *at <= deadline)
            });

            if let Some((index, at)) = due_animation {
                self.clock.set(at);
                let finished = self.in_flight.remove(index);
                self.engine.animation_finished(finished.ticket);
            } else if let Some(deadline) = next_timer.filter(|deadline| *deadline <= target) {
                self.clock.set(deadline);
                if self.clock.now() < deadline {
                    log::warn!("Timer deadline lies past the virtual clock's range");
                    break;
                }
                self.engine.tick();
            } else {
                break;
            }
            self.record();
        }
        self.clock.set(target);
    }

    fn collect_animations(&mut self) {
        let now = self.clock.now();
        while let Ok(request) = self.animation_rx.try_recv() {
            let Some(done_at) = now.checked_add(request.duration) else {
                log::warn!(
                    "Animation {} of {:?} never completes on this clock",
                    request.ticket,
                    request.duration
                );
                continue;
            };
            self.in_flight.push(InFlight {
                ticket: request.ticket,
                done_at,
            });
        }
    }

    /// Drain engine events into the log and pick up newly started animations
    fn record(&mut self) {
        for event in self.engine.take_events() {
            let line = self.describe(&event);
            self.note(line);
        }
        self.collect_animations();
    }

    fn describe(&self, event: &EngineEvent) -> String {
        let Some(id) = event.entry() else {
            return event.to_string();
        };
        let label = self
            .labels
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string());

        match event {
            EngineEvent::Queued(_) => format!("{}: queued", label),
            EngineEvent::Dropped { reason, .. } => {
                let reason = match reason {
                    DropReason::Cancelled => "cancelled",
                    DropReason::Dismissed => "dismissed",
                };
                format!("{}: dropped ({})", label, reason)
            }
            EngineEvent::WillAppear(_) => format!("{}: will appear", label),
            EngineEvent::DidAppear(_) => format!("{}: did appear", label),
            EngineEvent::WillDisappear { reason, .. } => {
                format!("{}: will disappear ({})", label, reason)
            }
            EngineEvent::DidDisappear { reason, .. } => {
                format!("{}: did disappear ({})", label, reason)
            }
            EngineEvent::MountFailed { error, .. } => {
                format!("{}: failed to mount: {}", label, error)
            }
            EngineEvent::SurfaceCreated(_) | EngineEvent::SurfaceTornDown(_) => event.to_string(),
        }
    }

    fn note(&mut self, message: String) {
        let elapsed = self.clock.elapsed().as_secs_f64();
        self.log.push(format!("{:.2}s  {}", elapsed, message));
    }
}

fn describe_touch(outcome: TouchOutcome) -> &'static str {
    match outcome {
        TouchOutcome::Dismissed => "dismissed",
        TouchOutcome::Consumed => "consumed",
        TouchOutcome::PassedThrough => "passed through",
    }
}

/// Replay `scenario` against a fresh engine configured by `config`
pub fn run_scenario(scenario: &Scenario, config: &Config) -> Result<Vec<String>, ConfigError> {
    ScenarioRunner::new(config).run(scenario)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
