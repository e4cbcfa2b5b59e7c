//! Scripted scenarios
//!
//! Replays a TOML script of display, time and gesture steps against an
//! engine driven by a virtual clock, and renders the lifecycle as a log.

mod runner;
mod script;
mod view;

pub use runner::{ScenarioRunner, run_scenario};
pub use script::{DismissKind, DisplayStep, Preset, Scenario, Step, load_scenario};
pub use view::{AnimationRequest, ScriptedView};
