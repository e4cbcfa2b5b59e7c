use thiserror::Error;

use crate::presentation::{AnimationTicket, Phase};

/// Errors returned synchronously from `Engine::display`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Invalid entry attributes: {0}")]
    Validation(#[from] ValidationError),

    #[error("Entry rejected: another entry is showing and the request asked to be dropped")]
    RejectedByPolicy,

    #[error("Entry failed to mount: {0}")]
    Mount(#[from] MountError),
}

/// Malformed or contradictory attributes. The request never enters the queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("display duration must be greater than zero")]
    ZeroDuration,

    #[error("display duration must not be negative (got {0})")]
    NegativeDuration(String),

    #[error("display duration is too large to represent (got {0} seconds)")]
    DurationOutOfRange(String),

    #[error("dismiss policy `none` cannot be combined with other triggers")]
    ContradictoryDismissPolicy,

    #[error("tap-outside dismissal is unreachable while touches pass through the screen")]
    UnreachableOutsideTap,

    #[error("entry name must not be empty")]
    EmptyName,
}

/// The renderable could not be attached to the overlay surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("renderable has zero size")]
    ZeroSize,

    #[error("renderable refused to mount: {0}")]
    Rejected(String),
}

/// A transition the session state machine refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("transition `{transition}` is not valid from {phase:?}")]
    Invalid {
        phase: Phase,
        transition: &'static str,
    },

    #[error("animation ticket {0} does not match the in-flight animation")]
    StaleTicket(AnimationTicket),
}

/// Config and scenario file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid scenario: {0}")]
    Scenario(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
