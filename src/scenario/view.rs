use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::attributes::Animation;
use crate::error::MountError;
use crate::overlay::SurfaceHandle;
use crate::presentation::AnimationTicket;
use crate::renderable::{Renderable, Size};

/// An animation a scripted view was asked to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRequest {
    pub ticket: AnimationTicket,
    pub duration: Duration,
}

/// Renderable without pixels. Animations are forwarded to the runner,
/// which completes them on the virtual timeline.
pub struct ScriptedView {
    size: Size,
    fail_mount: bool,
    animations: Sender<AnimationRequest>,
}

impl ScriptedView {
    pub fn new(size: Size, fail_mount: bool, animations: Sender<AnimationRequest>) -> Self {
        Self {
            size,
            fail_mount,
            animations,
        }
    }

    fn request(&self, animation: &Animation, ticket: AnimationTicket) {
        let request = AnimationRequest {
            ticket,
            duration: animation.duration,
        };
        if self.animations.send(request).is_err() {
            log::debug!("Runner gone, dropping animation {}", ticket);
        }
    }
}

impl Renderable for ScriptedView {
    fn preferred_size(&self) -> Size {
        self.size
    }

    fn mount(&self, surface: &SurfaceHandle) -> Result<(), MountError> {
        if self.fail_mount {
            return Err(MountError::Rejected(format!(
                "scripted failure on {}",
                surface.id()
            )));
        }
        Ok(())
    }

    fn animate_in(&self, animation: &Animation, ticket: AnimationTicket) {
        self.request(animation, ticket);
    }

    fn animate_out(&self, animation: &Animation, ticket: AnimationTicket) {
        self.request(animation, ticket);
    }
}
