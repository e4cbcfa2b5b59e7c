use super::types::{DismissTrigger, DisplayDuration, EntryAttributes, ScreenInteraction};
use crate::error::ValidationError;

impl EntryAttributes {
    /// Check attributes before a request is admitted.
    ///
    /// Contradictory combinations are rejected rather than coerced.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(ValidationError::EmptyName);
        }

        if let DisplayDuration::Finite(duration) = self.display_duration
            && duration.is_zero()
        {
            return Err(ValidationError::ZeroDuration);
        }

        if self.dismiss_policy.is_contradictory() {
            return Err(ValidationError::ContradictoryDismissPolicy);
        }

        // Outside taps never reach the entry when they pass through to the app
        if self.screen_interaction == ScreenInteraction::PassThroughTouches
            && self.dismiss_policy.contains(DismissTrigger::TapOutside)
        {
            return Err(ValidationError::UnreachableOutsideTap);
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;
