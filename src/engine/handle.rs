//! Cross-thread access to an engine
//!
//! The engine itself lives on one context. Other threads post commands
//! through an `EngineHandle`; they take effect on the next `Engine::pump`.

use std::sync::mpsc::{self, Receiver, Sender};

use super::SubmitOutcome;
use crate::attributes::EntryAttributes;
use crate::dismissal::DismissTarget;
use crate::error::EntryError;
use crate::presentation::{AnimationTicket, TimerToken};
use crate::renderable::RenderableRef;
use crate::request::EntryId;

pub type SubmitReply = Result<SubmitOutcome, EntryError>;

/// Messages marshalled onto the engine's context
pub enum Command {
    Display {
        renderable: RenderableRef,
        attributes: EntryAttributes,
        reply: Option<Sender<SubmitReply>>,
    },
    Dismiss(DismissTarget),
    Cancel(EntryId),
    AnimationFinished(AnimationTicket),
    TimerFired(TimerToken),
}

/// Cloneable, `Send` sender side of the engine's command channel
#[derive(Clone)]
pub struct EngineHandle {
    tx: Sender<Command>,
}

impl EngineHandle {
    pub(crate) fn new(tx: Sender<Command>) -> Self {
        Self { tx }
    }

    /// Post a display request. The receiver yields the result once the
    /// engine has pumped the command.
    pub fn display(
        &self,
        renderable: RenderableRef,
        attributes: EntryAttributes,
    ) -> Receiver<SubmitReply> {
        let (reply_tx, reply_rx) = mpsc::channel();
        let sent = self.send(Command::Display {
            renderable,
            attributes,
            reply: Some(reply_tx),
        });
        if !sent {
            log::debug!("Display posted to an engine that no longer exists");
        }
        reply_rx
    }

    pub fn dismiss(&self, target: DismissTarget) -> bool {
        self.send(Command::Dismiss(target))
    }

    pub fn cancel(&self, id: EntryId) -> bool {
        self.send(Command::Cancel(id))
    }

    pub fn animation_finished(&self, ticket: AnimationTicket) -> bool {
        self.send(Command::AnimationFinished(ticket))
    }

    pub fn timer_fired(&self, token: TimerToken) -> bool {
        self.send(Command::TimerFired(token))
    }

    /// Returns false when the engine has been dropped
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }
}
