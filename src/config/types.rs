// Configuration type definitions

use serde::Deserialize;

use crate::attributes::{DisplayDuration, EntryAttributes, Position};
use crate::scheduler::TiePolicy;

/// Scheduler configuration section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub max_priority_ties: TiePolicy,
}

/// Default attribute values for entries built from config
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub display_duration: DisplayDuration,
    #[serde(default)]
    pub position: Position,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            display_duration: DisplayDuration::default(),
            position: Position::Top,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Attributes seeded from the `[defaults]` section
    pub fn default_attributes(&self) -> EntryAttributes {
        EntryAttributes::default()
            .with_duration(self.defaults.display_duration)
            .with_position(self.defaults.position)
    }
}
