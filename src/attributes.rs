//! Entry attributes
//!
//! Immutable-per-request configuration: where an entry sits, how it ranks
//! against other entries, how long it stays and what dismisses it.

mod presets;
mod types;
mod validation;

pub use presets::{bottom_toast, popup, processing_note, status_bar, top_note, top_toast};
pub use types::{
    Animation, AnimationKind, DismissPolicy, DismissTrigger, DisplayDuration, EntryAttributes,
    Position, Precedence, Priority, ScreenInteraction,
};
