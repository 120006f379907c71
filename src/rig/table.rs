//! Sparse round -> candidate mapping.

use im::OrdMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::candidate::CandidateId;
use crate::core::error::ResolveError;

/// Pre-committed outcomes keyed by round number (1-based).
///
/// Backed by a persistent ordered map so snapshots are O(1) and entries
/// iterate in round order.
///
/// ## Example
///
/// ```
/// use raffle_wheel::core::CandidateId;
/// use raffle_wheel::rig::RigTable;
///
/// let mut rig = RigTable::new();
/// rig.set(2, CandidateId(7)).unwrap();
/// rig.set(4, CandidateId(9)).unwrap();
///
/// // Resolving round 1: both reservations are in the future
/// let protected = rig.protected_after(1);
/// assert!(protected.contains(&CandidateId(7)));
/// assert!(protected.contains(&CandidateId(9)));
///
/// // Candidate 7 leaves the wheel
/// rig.purge_candidate(CandidateId(7));
/// assert_eq!(rig.get(2), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RigTable {
    entries: OrdMap<u32, CandidateId>,
}

impl RigTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `candidate` for `round`, replacing any previous entry.
    ///
    /// Returns the replaced candidate, if any. Round 0 is rejected.
    pub fn set(&mut self, round: u32, candidate: CandidateId) -> Result<Option<CandidateId>, ResolveError> {
        if round == 0 {
            return Err(ResolveError::InvalidRigRound(round));
        }
        if let Some(other) = self.reserved_round_for(candidate).filter(|&r| r != round) {
            // Allowed, but only one of the two can ever fire.
            debug!(%candidate, round, other, "candidate reserved for more than one round");
        }
        Ok(self.entries.insert(round, candidate))
    }

    /// Remove the entry for `round`. No-op if absent.
    pub fn clear_round(&mut self, round: u32) -> Option<CandidateId> {
        self.entries.remove(&round)
    }

    /// Remove the entry for a round that has just been resolved.
    pub fn consume(&mut self, round: u32) -> Option<CandidateId> {
        let consumed = self.entries.remove(&round);
        if let Some(candidate) = consumed {
            debug!(round, %candidate, "rig entry consumed");
        }
        consumed
    }

    /// Drop every entry targeting `candidate`.
    ///
    /// Returns how many entries were removed.
    pub fn purge_candidate(&mut self, candidate: CandidateId) -> usize {
        let rounds: Vec<u32> = self
            .entries
            .iter()
            .filter(|(_, &target)| target == candidate)
            .map(|(&round, _)| round)
            .collect();
        for round in &rounds {
            self.entries.remove(round);
        }
        let purged = rounds.len();
        if purged > 0 {
            debug!(%candidate, purged, "purged rig entries for removed candidate");
        }
        purged
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries = OrdMap::new();
    }

    /// Candidate reserved for `round`.
    #[must_use]
    pub fn get(&self, round: u32) -> Option<CandidateId> {
        self.entries.get(&round).copied()
    }

    /// Earliest round reserving `candidate`.
    #[must_use]
    pub fn reserved_round_for(&self, candidate: CandidateId) -> Option<u32> {
        self.entries
            .iter()
            .find(|(_, &target)| target == candidate)
            .map(|(&round, _)| round)
    }

    /// Candidates reserved for any round strictly after `round`.
    #[must_use]
    pub fn protected_after(&self, round: u32) -> FxHashSet<CandidateId> {
        self.entries
            .iter()
            .filter(|(&r, _)| r > round)
            .map(|(_, &target)| target)
            .collect()
    }

    /// Entries in ascending round order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, CandidateId)> + '_ {
        self.entries.iter().map(|(&round, &target)| (round, target))
    }

    /// Check if any entry targets `candidate`.
    #[must_use]
    pub fn references(&self, candidate: CandidateId) -> bool {
        self.entries.values().any(|&target| target == candidate)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
