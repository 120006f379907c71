//! Candidate identification.
//!
//! Every wheel segment has a unique `CandidateId`. Identity is by ID only:
//! two candidates with the same label are still distinct.
//!
//! ## Usage
//!
//! ```
//! use raffle_wheel::core::{Candidate, CandidateId};
//!
//! let a = Candidate::new(CandidateId(1), "Alice", "#EF5350");
//! let b = Candidate::new(CandidateId(2), "Alice", "#EF5350");
//!
//! assert_ne!(a.id, b.id);
//! assert_eq!(a.label, b.label);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a wheel segment.
///
/// IDs are allocated by [`CandidateSet`](crate::wheel::CandidateSet) and are
/// opaque to the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub u32);

impl CandidateId {
    /// Create a new candidate ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CandidateId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Candidate({})", self.0)
    }
}

/// A single selectable wheel segment.
///
/// `label` and `color` are display attributes only; resolution never
/// looks at them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier.
    pub id: CandidateId,

    /// Display text.
    pub label: String,

    /// Display color (CSS hex string).
    pub color: String,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(id: CandidateId, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            color: color.into(),
        }
    }
}
