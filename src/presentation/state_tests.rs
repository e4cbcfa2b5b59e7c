//! Tests for the session state machine

use std::time::{Duration, Instant};

use super::*;
use crate::attributes::Priority;
use crate::test_utils::test_helpers::{attrs, request};

fn timer(raw: u64) -> DisplayTimer {
    DisplayTimer::new(TimerToken::new(raw), Instant::now() + Duration::from_secs(3))
}

fn entering(raw_id: u64) -> (SessionState, AnimationTicket) {
    let mut session = SessionState::new();
    let effect = session
        .apply(Transition::Enter(request(raw_id, attrs(Priority::Normal))))
        .unwrap();
    match effect {
        Effect::AnimateIn(ticket) => (session, ticket),
        other => panic!("expected AnimateIn, got {:?}", other),
    }
}

fn displaying(raw_id: u64) -> SessionState {
    let (mut session, ticket) = entering(raw_id);
    session
        .apply(Transition::EntranceFinished {
            ticket,
            timer: Some(timer(1)),
        })
        .unwrap();
    session
}

fn exit_ticket(effect: Effect) -> AnimationTicket {
    match effect {
        Effect::AnimateOut { ticket, .. } => ticket,
        other => panic!("expected AnimateOut, got {:?}", other),
    }
}

#[test]
fn test_new_session_is_empty() {
    let session = SessionState::new();
    assert_eq!(session.phase(), Phase::Empty);
    assert!(session.active().is_none());
    assert!(session.pending_timer().is_none());
    assert!(session.current_ticket().is_none());
}

#[test]
fn test_enter_from_empty() {
    let (session, ticket) = entering(1);

    assert_eq!(session.phase(), Phase::EnteringCurrent);
    assert_eq!(ticket.entry().as_u64(), 1);
    assert!(session.is_awaiting(ticket));
    assert!(session.pending_timer().is_none());
}

#[test]
fn test_entrance_finished_arms_timer() {
    let session = displaying(1);

    assert_eq!(session.phase(), Phase::DisplayingCurrent);
    assert_eq!(session.pending_timer().map(|t| t.token()), Some(TimerToken::new(1)));
    assert!(session.current_ticket().is_none());
}

#[test]
fn test_enter_rejected_unless_empty() {
    let (mut session, _) = entering(1);

    let result = session.apply(Transition::Enter(request(2, attrs(Priority::High))));

    assert!(matches!(
        result,
        Err(TransitionError::Invalid {
            phase: Phase::EnteringCurrent,
            transition: "enter"
        })
    ));
    assert_eq!(session.active().map(|r| r.id().as_u64()), Some(1));
}

#[test]
fn test_exit_from_displaying_cancels_timer() {
    let mut session = displaying(1);

    let effect = session.apply(Transition::Exit(DismissReason::Manual)).unwrap();

    match effect {
        Effect::AnimateOut {
            reason,
            cancelled_timer,
            ..
        } => {
            assert_eq!(reason, DismissReason::Manual);
            assert_eq!(cancelled_timer, Some(TimerToken::new(1)));
        }
        other => panic!("expected AnimateOut, got {:?}", other),
    }
    assert_eq!(session.phase(), Phase::ExitingCurrent);
    assert!(session.pending_timer().is_none());
}

#[test]
fn test_exit_while_exiting_is_invalid() {
    let mut session = displaying(1);
    session.apply(Transition::Exit(DismissReason::Timeout)).unwrap();

    let result = session.apply(Transition::Exit(DismissReason::Manual));

    assert!(matches!(result, Err(TransitionError::Invalid { .. })));
    assert_eq!(session.phase(), Phase::ExitingCurrent);
}

#[test]
fn test_exit_when_empty_is_invalid() {
    let mut session = SessionState::new();
    let result = session.apply(Transition::Exit(DismissReason::Manual));
    assert!(matches!(
        result,
        Err(TransitionError::Invalid {
            phase: Phase::Empty,
            ..
        })
    ));
}

#[test]
fn test_exit_during_entrance_is_deferred() {
    let (mut session, ticket) = entering(1);

    let effect = session.apply(Transition::Exit(DismissReason::Swipe)).unwrap();
    assert!(matches!(effect, Effect::ExitDeferred(DismissReason::Swipe)));
    assert_eq!(session.phase(), Phase::EnteringCurrent);
    assert_eq!(session.deferred_exit(), Some(DismissReason::Swipe));

    let effect = session
        .apply(Transition::EntranceFinished {
            ticket,
            timer: Some(timer(7)),
        })
        .unwrap();

    match effect {
        Effect::Displayed {
            timer,
            deferred_exit,
        } => {
            assert!(timer.is_none());
            assert_eq!(deferred_exit, Some(DismissReason::Swipe));
        }
        other => panic!("expected Displayed, got {:?}", other),
    }
    assert!(session.pending_timer().is_none());
    assert!(session.deferred_exit().is_none());
}

#[test]
fn test_first_deferred_reason_wins() {
    let (mut session, _) = entering(1);
    session.apply(Transition::Exit(DismissReason::Manual)).unwrap();

    let effect = session.apply(Transition::Exit(DismissReason::Timeout)).unwrap();

    assert!(matches!(effect, Effect::ExitDeferred(DismissReason::Manual)));
}

#[test]
fn test_preemption_during_entrance_exits_immediately() {
    let (mut session, entrance) = entering(1);

    let effect = session
        .apply(Transition::Exit(DismissReason::Preempted))
        .unwrap();
    let exit = exit_ticket(effect);

    assert_eq!(session.phase(), Phase::ExitingCurrent);
    assert_ne!(exit, entrance);
    assert!(!session.is_awaiting(entrance));
}

#[test]
fn test_stale_entrance_ticket_rejected() {
    let (mut session, entrance) = entering(1);
    session
        .apply(Transition::Exit(DismissReason::Preempted))
        .unwrap();

    let result = session.apply(Transition::EntranceFinished {
        ticket: entrance,
        timer: None,
    });

    assert!(matches!(result, Err(TransitionError::Invalid { .. })));
}

#[test]
fn test_stale_exit_ticket_rejected() {
    let mut session = displaying(1);
    let exit = exit_ticket(session.apply(Transition::Exit(DismissReason::Manual)).unwrap());
    let bogus = {
        let (_, other) = entering(9);
        other
    };

    let result = session.apply(Transition::ExitFinished {
        ticket: bogus,
        next: None,
    });
    assert!(matches!(result, Err(TransitionError::StaleTicket(_))));
    assert!(session.is_awaiting(exit));
}

#[test]
fn test_exit_finished_without_next_returns_to_empty() {
    let mut session = displaying(1);
    let ticket = exit_ticket(session.apply(Transition::Exit(DismissReason::Timeout)).unwrap());

    let effect = session
        .apply(Transition::ExitFinished { ticket, next: None })
        .unwrap();

    match effect {
        Effect::Exited {
            previous,
            reason,
            next,
        } => {
            assert_eq!(previous.id().as_u64(), 1);
            assert_eq!(reason, DismissReason::Timeout);
            assert!(next.is_none());
        }
        other => panic!("expected Exited, got {:?}", other),
    }
    assert_eq!(session.phase(), Phase::Empty);
    assert!(session.active().is_none());
    assert!(session.current_ticket().is_none());
}

#[test]
fn test_exit_finished_with_next_enters_directly() {
    let mut session = displaying(1);
    let ticket = exit_ticket(session.apply(Transition::Exit(DismissReason::Manual)).unwrap());

    let effect = session
        .apply(Transition::ExitFinished {
            ticket,
            next: Some(request(2, attrs(Priority::Low))),
        })
        .unwrap();

    let Effect::Exited {
        next: Some(entrance),
        ..
    } = effect
    else {
        panic!("expected Exited with a next entrance");
    };
    assert_eq!(entrance.entry().as_u64(), 2);
    assert_eq!(session.phase(), Phase::EnteringCurrent);
    assert!(session.is_awaiting(entrance));
    assert_eq!(session.active().map(|r| r.id().as_u64()), Some(2));
}

#[test]
fn test_tickets_never_repeat() {
    let (mut session, first) = entering(1);
    session
        .apply(Transition::EntranceFinished {
            ticket: first,
            timer: None,
        })
        .unwrap();
    let second = exit_ticket(session.apply(Transition::Exit(DismissReason::Manual)).unwrap());
    let Effect::Exited {
        next: Some(third), ..
    } = session
        .apply(Transition::ExitFinished {
            ticket: second,
            next: Some(request(1, attrs(Priority::Normal))),
        })
        .unwrap()
    else {
        panic!("expected a next entrance");
    };

    // Same entry id, distinct tickets
    assert_eq!(first.entry(), third.entry());
    assert_ne!(first, third);
    assert_ne!(first, second);
}
