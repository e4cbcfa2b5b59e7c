//! Ready-made attribute sets for the common entry kinds

use std::time::Duration;

use super::types::{
    Animation, AnimationKind, DismissPolicy, DismissTrigger, DisplayDuration, EntryAttributes,
    Position, Precedence, Priority, ScreenInteraction,
};

/// Short notice sliding in from the top, dismissed by tap or swipe
pub fn top_toast() -> EntryAttributes {
    EntryAttributes::default()
        .with_position(Position::Top)
        .with_duration(DisplayDuration::from_secs(3))
        .with_dismiss_policy(DismissPolicy::of(&[
            DismissTrigger::TapInside,
            DismissTrigger::Swipe,
        ]))
}

pub fn bottom_toast() -> EntryAttributes {
    top_toast().with_position(Position::Bottom)
}

/// Thin note pinned to the top edge. Cannot be dismissed by touch.
pub fn top_note() -> EntryAttributes {
    EntryAttributes::default()
        .with_position(Position::Top)
        .with_duration(DisplayDuration::from_secs(2))
        .with_dismiss_policy(DismissPolicy::none())
        .with_animations(Animation::translate(), Animation::translate())
}

/// Replaces the status bar area. Outranks ordinary toasts and pushes them out.
pub fn status_bar() -> EntryAttributes {
    top_note()
        .with_priority(Priority::High)
        .with_precedence(Precedence::ReplaceIfLowerPriority)
}

/// Modal popup: absorbs screen touches and closes on an outside tap
pub fn popup() -> EntryAttributes {
    EntryAttributes::default()
        .with_position(Position::Bottom)
        .with_duration(DisplayDuration::Infinite)
        .with_screen_interaction(ScreenInteraction::AbsorbTouches)
        .with_dismiss_policy(DismissPolicy::of(&[DismissTrigger::TapOutside]))
        .with_animations(
            Animation::new(AnimationKind::Scale, Duration::from_millis(400)),
            Animation::fade(),
        )
}

/// Note that stays up until the work it describes completes
pub fn processing_note() -> EntryAttributes {
    top_note()
        .with_duration(DisplayDuration::Infinite)
        .with_precedence(Precedence::DropIfEntryShowing)
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod presets_tests;
