//! Candidate set: the segments currently eligible for selection.
//!
//! The `CandidateSet` owns segment order and ID allocation. It supports:
//! - Insertion-ordered listing for display
//! - Lookup and removal by `CandidateId`
//! - Palette-cycled colors for new segments
//! - The three-option default wheel

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::candidate::{Candidate, CandidateId};

/// Colors assigned to new segments, cycled by current set length.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#EF5350", // Coral Red
    "#F7DC6F", // Yellow
    "#81C784", // Light Green
    "#64B5F6", // Light Blue
    "#BA68C8", // Purple
    "#FFB74D", // Orange
    "#4DB6AC", // Teal
    "#F06292", // Pink
];

/// Number of options on a fresh wheel.
pub const DEFAULT_OPTION_COUNT: usize = 3;

/// Ordered set of wheel segments.
///
/// ## Usage
///
/// ```
/// use raffle_wheel::wheel::CandidateSet;
///
/// let mut set = CandidateSet::new();
/// let a = set.add_labeled("Alice");
/// let b = set.add_labeled("Bob");
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.list()[0].id, a);
///
/// set.remove(a);
/// assert!(!set.contains(a));
/// assert!(set.contains(b));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,

    /// Next ID to try. IDs are not reused until the `u32` space is
    /// exhausted, after which allocation wraps and skips IDs in use.
    next_id: u32,
}

impl CandidateSet {
    /// Create a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the default wheel: `Option 1`, `Option 2`, `Option 3`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        for _ in 0..DEFAULT_OPTION_COUNT {
            set.add_default();
        }
        set
    }

    /// Build a set from previously stored candidates.
    ///
    /// Duplicate IDs are dropped (first occurrence wins) so a corrupted
    /// record cannot produce two segments with the same identity.
    #[must_use]
    pub fn from_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        let mut set = Self::new();
        for candidate in candidates {
            if set.contains(candidate.id) {
                warn!(id = %candidate.id, "dropping duplicate candidate");
                continue;
            }
            set.add(candidate);
        }
        set
    }

    /// Add a candidate with a caller-provided ID.
    ///
    /// Panics if a candidate with the same ID is already in the set.
    pub fn add(&mut self, candidate: Candidate) {
        if self.contains(candidate.id) {
            panic!("Candidate {} already in set", candidate.id);
        }
        self.next_id = self.next_id.max(candidate.id.raw().saturating_add(1));
        self.candidates.push(candidate);
    }

    /// Add a segment with the given label and the next palette color.
    ///
    /// Returns the allocated ID.
    pub fn add_labeled(&mut self, label: impl Into<String>) -> CandidateId {
        let id = self.alloc_id();
        let color = DEFAULT_PALETTE[self.candidates.len() % DEFAULT_PALETTE.len()];
        self.candidates.push(Candidate::new(id, label, color));
        id
    }

    /// Add a segment labeled `Option <len + 1>`.
    pub fn add_default(&mut self) -> CandidateId {
        let label = format!("Option {}", self.candidates.len() + 1);
        self.add_labeled(label)
    }

    /// Remove a candidate.
    ///
    /// Returns the removed candidate, or `None` if it wasn't present.
    pub fn remove(&mut self, id: CandidateId) -> Option<Candidate> {
        let pos = self.index_of(id)?;
        Some(self.candidates.remove(pos))
    }

    /// Remove all candidates. ID allocation continues where it left off.
    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    /// Candidates in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Iterate over IDs in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.candidates.iter().map(|c| c.id)
    }

    /// Get a candidate by ID.
    #[must_use]
    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Display position of a candidate.
    #[must_use]
    pub fn index_of(&self, id: CandidateId) -> Option<usize> {
        self.candidates.iter().position(|c| c.id == id)
    }

    /// Check if the set contains a candidate.
    #[must_use]
    pub fn contains(&self, id: CandidateId) -> bool {
        self.index_of(id).is_some()
    }

    /// Change a candidate's label.
    ///
    /// A blank label keeps the old one. Returns false if the ID is unknown.
    pub fn rename(&mut self, id: CandidateId, label: &str) -> bool {
        let Some(candidate) = self.candidates.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if !label.trim().is_empty() {
            candidate.label = label.to_string();
        }
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    fn alloc_id(&mut self) -> CandidateId {
        let mut raw = self.next_id;
        while self.contains(CandidateId(raw)) {
            raw = raw.wrapping_add(1);
        }
        self.next_id = raw.wrapping_add(1);
        CandidateId(raw)
    }
}
