//! Presentation state machine
//!
//! Tracks the single active entry through
//! `Empty -> EnteringCurrent -> DisplayingCurrent -> ExitingCurrent`.

mod state;
mod timer;

pub use state::{AnimationTicket, Effect, Phase, SessionState, Transition};
pub use timer::{DisplayTimer, TimerToken};
