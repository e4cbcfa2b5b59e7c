use std::time::Instant;

/// Identifies one armed display timer. Expiry reports carrying a token that
/// no longer matches the armed timer are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTimer {
    token: TimerToken,
    deadline: Instant,
}

impl DisplayTimer {
    pub(crate) fn new(token: TimerToken, deadline: Instant) -> Self {
        Self { token, deadline }
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}
