//! Renderable collaborator contract
//!
//! The engine never builds views. It only sizes, mounts and animates
//! whatever the caller hands it through this trait.

use std::sync::Arc;

use crate::attributes::Animation;
use crate::error::MountError;
use crate::overlay::SurfaceHandle;
use crate::presentation::AnimationTicket;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or NaN
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// An opaque view the engine can present.
///
/// `animate_in` and `animate_out` must not block. When the animation is done
/// the implementation reports the ticket back to the engine, either through
/// `Engine::animation_finished` or an `EngineHandle`. Tickets from animations
/// the engine has since abandoned are ignored.
pub trait Renderable: Send + Sync {
    fn preferred_size(&self) -> Size;

    fn mount(&self, surface: &SurfaceHandle) -> Result<(), MountError>;

    fn animate_in(&self, animation: &Animation, ticket: AnimationTicket);

    fn animate_out(&self, animation: &Animation, ticket: AnimationTicket);

    /// Called once the exit animation completed and the view left the surface
    fn unmount(&self) {}

    /// Whether touches landing on the entry itself reach the app underneath
    fn passes_touches_through(&self) -> bool {
        false
    }
}

pub type RenderableRef = Arc<dyn Renderable>;
