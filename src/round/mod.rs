//! Round counter: selections completed in the current cycle.
//!
//! ## Transitions
//!
//! - `increment`: immediate mode, after every spin
//! - `advance_or_wrap(n)`: elimination mode, back to 0 when the n-th spin lands
//! - `reset`: operator action, mode switch into elimination, wheel cleared

use serde::{Deserialize, Serialize};

/// Number of selections completed in the current cycle.
///
/// The round being played is always `completed() + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundCounter(u32);

impl RoundCounter {
    /// Counter at the start of a cycle.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Counter with `completed` selections already made.
    #[must_use]
    pub const fn from_completed(completed: u32) -> Self {
        Self(completed)
    }

    /// Selections completed so far.
    #[must_use]
    pub const fn completed(self) -> u32 {
        self.0
    }

    /// The round the next spin resolves (1-based).
    #[must_use]
    pub const fn next_round(self) -> u32 {
        self.0.saturating_add(1)
    }

    /// Immediate mode: count one more selection.
    pub fn increment(&mut self) {
        self.0 = self.next_round();
    }

    /// Elimination mode: count one more selection, wrapping to 0 on the n-th.
    ///
    /// Returns true if the cycle completed.
    pub fn advance_or_wrap(&mut self, n: u32) -> bool {
        let next = self.next_round();
        if next >= n {
            self.0 = 0;
            true
        } else {
            self.0 = next;
            false
        }
    }

    /// Back to the start of a cycle.
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

impl std::fmt::Display for RoundCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round({})", self.next_round())
    }
}
