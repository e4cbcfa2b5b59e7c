// Attribute type definitions

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::ValidationError;

/// Screen edge the entry is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Bottom,
}

impl Position {
    pub fn is_top(self) -> bool {
        self == Position::Top
    }
}

/// Display priority. Ordered: `Low < Normal < High < Max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Max,
}

/// How long an entry stays in `DisplayingCurrent` before auto-dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDuration")]
pub enum DisplayDuration {
    Finite(Duration),
    Infinite,
}

impl DisplayDuration {
    pub fn from_secs(secs: u64) -> Self {
        DisplayDuration::Finite(Duration::from_secs(secs))
    }

    /// Convert a user supplied number of seconds. Negative and NaN values are
    /// rejected, positive infinity maps to `Infinite`. Finite values beyond
    /// what `Duration` holds are rejected rather than saturated.
    pub fn from_secs_f64(secs: f64) -> Result<Self, ValidationError> {
        if secs.is_nan() || secs < 0.0 {
            return Err(ValidationError::NegativeDuration(secs.to_string()));
        }
        if secs.is_infinite() {
            return Ok(DisplayDuration::Infinite);
        }
        Duration::try_from_secs_f64(secs)
            .map(DisplayDuration::Finite)
            .map_err(|_| ValidationError::DurationOutOfRange(secs.to_string()))
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            DisplayDuration::Finite(d) => Some(*d),
            DisplayDuration::Infinite => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, DisplayDuration::Infinite)
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        DisplayDuration::from_secs(3)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Seconds(f64),
    Keyword(String),
}

impl TryFrom<RawDuration> for DisplayDuration {
    type Error = String;

    fn try_from(raw: RawDuration) -> Result<Self, Self::Error> {
        match raw {
            RawDuration::Seconds(secs) => {
                DisplayDuration::from_secs_f64(secs).map_err(|e| e.to_string())
            }
            RawDuration::Keyword(word) if word.eq_ignore_ascii_case("infinite") => {
                Ok(DisplayDuration::Infinite)
            }
            RawDuration::Keyword(word) => Err(format!(
                "expected a number of seconds or \"infinite\", got \"{}\"",
                word
            )),
        }
    }
}

/// A single way the user can dismiss an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissTrigger {
    TapOutside,
    TapInside,
    Swipe,
    None,
}

/// Set of triggers armed while the entry is displaying
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DismissPolicy(BTreeSet<DismissTrigger>);

impl DismissPolicy {
    pub fn none() -> Self {
        Self::of(&[DismissTrigger::None])
    }

    pub fn of(triggers: &[DismissTrigger]) -> Self {
        Self(triggers.iter().copied().collect())
    }

    /// Whether the given trigger dismisses the entry.
    /// An explicit `None` trigger never dismisses anything.
    pub fn allows(&self, trigger: DismissTrigger) -> bool {
        trigger != DismissTrigger::None && self.0.contains(&trigger)
    }

    pub fn contains(&self, trigger: DismissTrigger) -> bool {
        self.0.contains(&trigger)
    }

    pub fn is_contradictory(&self) -> bool {
        self.0.contains(&DismissTrigger::None) && self.0.len() > 1
    }

    pub fn triggers(&self) -> impl Iterator<Item = DismissTrigger> + '_ {
        self.0.iter().copied()
    }
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self::of(&[DismissTrigger::TapInside, DismissTrigger::Swipe])
    }
}

/// How a request behaves when another entry is already active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Precedence {
    /// Wait in the pending queue
    #[default]
    Enqueue,
    /// Force the active entry out when this request ranks strictly higher
    ReplaceIfLowerPriority,
    /// Give up immediately if anything is showing
    DropIfEntryShowing,
}

/// Whether touches outside the entry reach the application underneath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScreenInteraction {
    AbsorbTouches,
    #[default]
    PassThroughTouches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    #[default]
    Translate,
    Scale,
    Fade,
    None,
}

/// Opaque animation descriptor handed to the renderable. The engine never
/// interprets it beyond passing it along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Animation {
    #[serde(default)]
    pub kind: AnimationKind,
    #[serde(default = "default_animation_duration", deserialize_with = "secs")]
    pub duration: Duration,
}

fn default_animation_duration() -> Duration {
    Duration::from_millis(300)
}

fn secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "animation duration must be a finite, non-negative number of seconds (got {})",
            value
        )));
    }
    Duration::try_from_secs_f64(value).map_err(|_| {
        serde::de::Error::custom(format!(
            "animation duration is too large to represent (got {} seconds)",
            value
        ))
    })
}

impl Animation {
    pub fn new(kind: AnimationKind, duration: Duration) -> Self {
        Self { kind, duration }
    }

    pub fn none() -> Self {
        Self::new(AnimationKind::None, Duration::ZERO)
    }

    pub fn translate() -> Self {
        Self::new(AnimationKind::Translate, default_animation_duration())
    }

    pub fn fade() -> Self {
        Self::new(AnimationKind::Fade, default_animation_duration())
    }

    pub fn scale() -> Self {
        Self::new(AnimationKind::Scale, default_animation_duration())
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::translate()
    }
}

/// Per-request configuration. Only `priority` and `precedence` influence
/// queue placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntryAttributes {
    /// Optional name used by `Named` dismissal and name queries
    pub name: Option<String>,
    pub position: Position,
    pub priority: Priority,
    pub display_duration: DisplayDuration,
    pub dismiss_policy: DismissPolicy,
    pub precedence: Precedence,
    pub entrance_animation: Animation,
    pub exit_animation: Animation,
    pub screen_interaction: ScreenInteraction,
}

impl Default for EntryAttributes {
    fn default() -> Self {
        Self {
            name: None,
            position: Position::Top,
            priority: Priority::Normal,
            display_duration: DisplayDuration::default(),
            dismiss_policy: DismissPolicy::default(),
            precedence: Precedence::Enqueue,
            entrance_animation: Animation::translate(),
            exit_animation: Animation::fade(),
            screen_interaction: ScreenInteraction::PassThroughTouches,
        }
    }
}

impl EntryAttributes {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_duration(mut self, duration: DisplayDuration) -> Self {
        self.display_duration = duration;
        self
    }

    pub fn with_dismiss_policy(mut self, policy: DismissPolicy) -> Self {
        self.dismiss_policy = policy;
        self
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_animations(mut self, entrance: Animation, exit: Animation) -> Self {
        self.entrance_animation = entrance;
        self.exit_animation = exit;
        self
    }

    pub fn with_screen_interaction(mut self, interaction: ScreenInteraction) -> Self {
        self.screen_interaction = interaction;
        self
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
