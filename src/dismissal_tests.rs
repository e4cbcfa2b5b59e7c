//! Tests for dismissal coordination

use std::time::Duration;

use super::*;
use crate::attributes::{DismissPolicy, EntryAttributes};
use crate::clock::ManualClock;
use crate::presentation::{Effect, Transition};
use crate::test_utils::test_helpers::{attrs, request};

fn coordinator() -> (DismissalCoordinator, ManualClock) {
    let clock = ManualClock::new();
    (DismissalCoordinator::new(Box::new(clock.clone())), clock)
}

fn entering_with(attributes: EntryAttributes) -> SessionState {
    let mut session = SessionState::new();
    session
        .apply(Transition::Enter(request(1, attributes)))
        .unwrap();
    session
}

fn displaying_with(
    coordinator: &mut DismissalCoordinator,
    attributes: EntryAttributes,
) -> SessionState {
    let duration = attributes.display_duration;
    let mut session = entering_with(attributes);
    let ticket = session.current_ticket().unwrap();
    let timer = coordinator.arm(duration);
    let effect = session
        .apply(Transition::EntranceFinished { ticket, timer })
        .unwrap();
    assert!(matches!(effect, Effect::Displayed { .. }));
    session
}

// =========================================================================
// Targets
// =========================================================================

#[test]
fn test_active_target_never_matches_pending() {
    let pending = request(2, attrs(Priority::Normal));
    assert!(!DismissTarget::Active.matches_pending(&pending));
    assert!(DismissTarget::Active.matches_active(&pending));
}

#[test]
fn test_enqueued_target_never_matches_active() {
    let active = request(1, attrs(Priority::Normal));
    assert!(DismissTarget::Enqueued.matches_pending(&active));
    assert!(!DismissTarget::Enqueued.matches_active(&active));
}

#[test]
fn test_named_target_matches_by_name() {
    let named = request(1, attrs(Priority::Normal).with_name("sync"));
    let unnamed = request(2, attrs(Priority::Normal));
    let target = DismissTarget::Named("sync".to_string());

    assert!(target.matches_pending(&named));
    assert!(target.matches_active(&named));
    assert!(!target.matches_pending(&unnamed));
}

#[test]
fn test_prioritized_at_most_is_inclusive() {
    let target = DismissTarget::PrioritizedAtMost(Priority::Normal);
    assert!(target.matches_pending(&request(1, attrs(Priority::Low))));
    assert!(target.matches_pending(&request(2, attrs(Priority::Normal))));
    assert!(!target.matches_pending(&request(3, attrs(Priority::High))));
}

#[test]
fn test_specific_target() {
    let entry = request(4, attrs(Priority::Normal));
    assert!(DismissTarget::Specific(entry.id()).matches_active(&entry));
    assert!(!DismissTarget::Specific(EntryId::new(5)).matches_pending(&entry));
}

#[test]
fn test_target_reasons() {
    assert_eq!(DismissTarget::All.reason(), DismissReason::DismissAll);
    assert_eq!(DismissTarget::Active.reason(), DismissReason::Manual);
    assert_eq!(
        DismissTarget::Named("x".to_string()).reason(),
        DismissReason::Manual
    );
}

#[test]
fn test_reason_display() {
    assert_eq!(DismissReason::TapOutside.to_string(), "tap outside");
    assert_eq!(DismissReason::Preempted.to_string(), "preempted");
}

// =========================================================================
// Timers
// =========================================================================

#[test]
fn test_arm_infinite_gives_no_timer() {
    let (mut coordinator, _clock) = coordinator();
    assert!(coordinator.arm(DisplayDuration::Infinite).is_none());
}

#[test]
fn test_arm_sets_deadline_from_clock() {
    let (mut coordinator, clock) = coordinator();
    clock.advance(Duration::from_secs(10));

    let timer = coordinator.arm(DisplayDuration::from_secs(2)).unwrap();

    assert_eq!(timer.deadline(), clock.now() + Duration::from_secs(2));
}

#[test]
fn test_arm_overflowing_duration_gives_no_timer() {
    let (mut coordinator, _clock) = coordinator();
    assert!(coordinator.arm(DisplayDuration::Finite(Duration::MAX)).is_none());
}

#[test]
fn test_each_arm_gets_fresh_token() {
    let (mut coordinator, _clock) = coordinator();
    let first = coordinator.arm(DisplayDuration::from_secs(1)).unwrap();
    let second = coordinator.arm(DisplayDuration::from_secs(1)).unwrap();
    assert_ne!(first.token(), second.token());
}

#[test]
fn test_armed_token_fires_timeout() {
    let (mut coordinator, _clock) = coordinator();
    let session = displaying_with(&mut coordinator, attrs(Priority::Normal));
    let token = session.pending_timer().unwrap().token();

    assert_eq!(
        coordinator.on_timer_fired(&session, token),
        Some(DismissReason::Timeout)
    );
}

#[test]
fn test_foreign_token_ignored() {
    let (mut coordinator, _clock) = coordinator();
    let stale = coordinator.arm(DisplayDuration::from_secs(1)).unwrap().token();
    let session = displaying_with(&mut coordinator, attrs(Priority::Normal));

    assert_eq!(coordinator.on_timer_fired(&session, stale), None);
}

#[test]
fn test_expired_timer_waits_for_deadline() {
    let (mut coordinator, clock) = coordinator();
    let session = displaying_with(&mut coordinator, attrs(Priority::Normal));

    clock.advance(Duration::from_millis(2999));
    assert!(coordinator.expired_timer(&session).is_none());

    clock.advance(Duration::from_millis(1));
    assert_eq!(
        coordinator.expired_timer(&session),
        session.pending_timer().map(|t| t.token())
    );
}

#[test]
fn test_no_timer_while_entering() {
    let (coordinator, clock) = coordinator();
    let session = entering_with(attrs(Priority::Normal));
    clock.advance(Duration::from_secs(60));
    assert!(coordinator.expired_timer(&session).is_none());
}

// =========================================================================
// Gestures
// =========================================================================

#[test]
fn test_gesture_without_active_passes_through() {
    let (coordinator, _clock) = coordinator();
    let session = SessionState::new();

    let resolution = coordinator.on_gesture(&session, Gesture::Swipe);

    assert_eq!(resolution.outcome, TouchOutcome::PassedThrough);
    assert_eq!(resolution.exit, None);
}

#[test]
fn test_swipe_dismisses_with_default_policy() {
    let (mut coordinator, _clock) = coordinator();
    let session = displaying_with(&mut coordinator, attrs(Priority::Normal));

    let resolution = coordinator.on_gesture(&session, Gesture::Swipe);

    assert_eq!(resolution.outcome, TouchOutcome::Dismissed);
    assert_eq!(resolution.exit, Some(DismissReason::Swipe));
}

#[test]
fn test_swipe_consumed_when_not_a_trigger() {
    let (mut coordinator, _clock) = coordinator();
    let session = displaying_with(
        &mut coordinator,
        attrs(Priority::Normal).with_dismiss_policy(DismissPolicy::none()),
    );

    let resolution = coordinator.on_gesture(&session, Gesture::Swipe);

    assert_eq!(resolution.outcome, TouchOutcome::Consumed);
    assert_eq!(resolution.exit, None);
}

#[test]
fn test_inside_tap_ignored_during_entrance() {
    let (coordinator, _clock) = coordinator();
    let session = entering_with(attrs(Priority::Normal));

    let resolution = coordinator.on_gesture(&session, Gesture::Tap(TouchLocation::Inside));

    assert_eq!(resolution.outcome, TouchOutcome::Consumed);
    assert_eq!(resolution.exit, None);
}

#[test]
fn test_outside_tap_with_absorb_and_trigger_dismisses() {
    let (mut coordinator, _clock) = coordinator();
    let session = displaying_with(
        &mut coordinator,
        attrs(Priority::Normal)
            .with_screen_interaction(ScreenInteraction::AbsorbTouches)
            .with_dismiss_policy(DismissPolicy::of(&[DismissTrigger::TapOutside])),
    );

    let resolution = coordinator.on_gesture(&session, Gesture::Tap(TouchLocation::Outside));

    assert_eq!(resolution.exit, Some(DismissReason::TapOutside));
}

#[test]
fn test_outside_tap_with_pass_through_reaches_app() {
    let (mut coordinator, _clock) = coordinator();
    let session = displaying_with(&mut coordinator, attrs(Priority::Normal));

    let resolution = coordinator.on_gesture(&session, Gesture::Tap(TouchLocation::Outside));

    assert_eq!(resolution.outcome, TouchOutcome::PassedThrough);
}

#[test]
fn test_touch_location_deserializes_lowercase() {
    #[derive(Deserialize)]
    struct Wrapper {
        location: TouchLocation,
    }

    let parsed: Wrapper = toml::from_str(r#"location = "outside""#).unwrap();
    assert_eq!(parsed.location, TouchLocation::Outside);
}
