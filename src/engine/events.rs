use std::fmt;

use crate::dismissal::DismissReason;
use crate::error::MountError;
use crate::overlay::SurfaceId;
use crate::request::EntryId;

/// Why a pending request was removed without being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Cancelled,
    Dismissed,
}

/// Lifecycle notifications, drained with `Engine::take_events`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SurfaceCreated(SurfaceId),
    SurfaceTornDown(SurfaceId),
    Queued(EntryId),
    Dropped { id: EntryId, reason: DropReason },
    WillAppear(EntryId),
    DidAppear(EntryId),
    WillDisappear { id: EntryId, reason: DismissReason },
    DidDisappear { id: EntryId, reason: DismissReason },
    MountFailed { id: EntryId, error: MountError },
}

impl EngineEvent {
    /// The entry this event is about, if any
    pub fn entry(&self) -> Option<EntryId> {
        match self {
            EngineEvent::SurfaceCreated(_) | EngineEvent::SurfaceTornDown(_) => None,
            EngineEvent::Queued(id)
            | EngineEvent::WillAppear(id)
            | EngineEvent::DidAppear(id)
            | EngineEvent::Dropped { id, .. }
            | EngineEvent::WillDisappear { id, .. }
            | EngineEvent::DidDisappear { id, .. }
            | EngineEvent::MountFailed { id, .. } => Some(*id),
        }
    }
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineEvent::SurfaceCreated(surface) => write!(f, "{} created", surface),
            EngineEvent::SurfaceTornDown(surface) => write!(f, "{} torn down", surface),
            EngineEvent::Queued(id) => write!(f, "{} queued", id),
            EngineEvent::Dropped { id, reason } => {
                let reason = match reason {
                    DropReason::Cancelled => "cancelled",
                    DropReason::Dismissed => "dismissed",
                };
                write!(f, "{} dropped ({})", id, reason)
            }
            EngineEvent::WillAppear(id) => write!(f, "{} will appear", id),
            EngineEvent::DidAppear(id) => write!(f, "{} did appear", id),
            EngineEvent::WillDisappear { id, reason } => {
                write!(f, "{} will disappear ({})", id, reason)
            }
            EngineEvent::DidDisappear { id, reason } => {
                write!(f, "{} did disappear ({})", id, reason)
            }
            EngineEvent::MountFailed { id, error } => write!(f, "{} failed to mount: {}", id, error),
        }
    }
}
