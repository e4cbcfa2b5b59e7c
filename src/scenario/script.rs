use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::attributes::{
    DisplayDuration, EntryAttributes, Precedence, Priority, bottom_toast, popup,
    processing_note, status_bar, top_note, top_toast,
};
use crate::dismissal::TouchLocation;
use crate::error::ConfigError;

/// A scenario file: an ordered list of `[[step]]` tables
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Scenario {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Display(DisplayStep),
    /// Move the virtual clock forward, completing animations and timers on the way
    Advance {
        seconds: f64,
    },
    Tap {
        location: TouchLocation,
    },
    Swipe,
    Dismiss {
        target: DismissKind,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        priority: Option<Priority>,
    },
    Cancel {
        label: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissKind {
    Active,
    All,
    Enqueued,
    /// Needs `name`
    Named,
    /// Needs `label` of an earlier display step
    Specific,
    /// Needs `priority`
    PrioritizedAtMost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    TopToast,
    BottomToast,
    TopNote,
    StatusBar,
    Popup,
    ProcessingNote,
}

impl Preset {
    pub fn attributes(self) -> EntryAttributes {
        match self {
            Preset::TopToast => top_toast(),
            Preset::BottomToast => bottom_toast(),
            Preset::TopNote => top_note(),
            Preset::StatusBar => status_bar(),
            Preset::Popup => popup(),
            Preset::ProcessingNote => processing_note(),
        }
    }
}

fn default_width() -> f32 {
    320.0
}

fn default_height() -> f32 {
    64.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayStep {
    /// Name the log uses for this entry
    pub label: String,
    #[serde(default)]
    pub preset: Option<Preset>,
    /// Full attribute table. Replaces the preset when both are given.
    #[serde(default)]
    pub attributes: Option<EntryAttributes>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub precedence: Option<Precedence>,
    #[serde(default)]
    pub duration: Option<DisplayDuration>,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub fail_mount: bool,
}

impl DisplayStep {
    /// Resolve the attributes for this step. `defaults` is used when
    /// neither a preset nor an attribute table is given.
    pub fn resolve(&self, defaults: &EntryAttributes) -> EntryAttributes {
        let mut resolved = match (&self.attributes, self.preset) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(preset)) => preset.attributes(),
            (None, None) => defaults.clone(),
        };

        if let Some(name) = &self.name {
            resolved = resolved.with_name(name.clone());
        }
        if let Some(priority) = self.priority {
            resolved = resolved.with_priority(priority);
        }
        if let Some(precedence) = self.precedence {
            resolved = resolved.with_precedence(precedence);
        }
        if let Some(duration) = self.duration {
            resolved = resolved.with_duration(duration);
        }
        resolved
    }
}

impl Scenario {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.check()?;
        Ok(scenario)
    }

    /// Reject steps that are well-formed TOML but cannot be replayed
    fn check(&self) -> Result<(), ConfigError> {
        for (index, step) in self.steps.iter().enumerate() {
            let problem = match step {
                Step::Advance { seconds } if Duration::try_from_secs_f64(*seconds).is_err() => {
                    Some(format!("advance by {} seconds", seconds))
                }
                Step::Display(display) if display.label.trim().is_empty() => {
                    Some("display step without a label".to_string())
                }
                Step::Dismiss {
                    target: DismissKind::Named,
                    name: None,
                    ..
                } => Some("dismiss `named` needs a `name`".to_string()),
                Step::Dismiss {
                    target: DismissKind::Specific,
                    label: None,
                    ..
                } => Some("dismiss `specific` needs a `label`".to_string()),
                Step::Dismiss {
                    target: DismissKind::PrioritizedAtMost,
                    priority: None,
                    ..
                } => Some("dismiss `prioritized_at_most` needs a `priority`".to_string()),
                _ => None,
            };

            if let Some(problem) = problem {
                return Err(ConfigError::Scenario(format!(
                    "step {}: {}",
                    index + 1,
                    problem
                )));
            }
        }
        Ok(())
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario, ConfigError> {
    let content = fs::read_to_string(path)?;
    Scenario::parse(&content)
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod script_tests;
