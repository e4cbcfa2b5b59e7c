//! Presentation engine for transient overlay entries.
//!
//! Callers submit a renderable plus `EntryAttributes`; the engine decides
//! when it is shown, runs it through entrance, display and exit, and keeps
//! at most one entry on the overlay surface at a time.

pub mod attributes;
pub mod clock;
pub mod config;
pub mod dismissal;
pub mod engine;
pub mod error;
pub mod overlay;
pub mod presentation;
pub mod renderable;
pub mod request;
pub mod scenario;
pub mod scheduler;

#[cfg(test)]
mod test_utils;

pub use attributes::{EntryAttributes, Position, Precedence, Priority};
pub use dismissal::{DismissReason, DismissTarget, Gesture, TouchLocation, TouchOutcome};
pub use engine::{Engine, EngineEvent, EngineHandle, SubmitOutcome};
pub use error::{EntryError, MountError, ValidationError};
pub use overlay::{HeadlessHost, OverlayHost};
pub use renderable::{Renderable, RenderableRef, Size};
pub use request::EntryId;
