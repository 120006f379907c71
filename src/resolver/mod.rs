//! Per-spin outcome resolution.
//!
//! Resolution is split in two so the decision can be shown before it takes
//! effect (the wheel animates towards a result that is already known):
//!
//! 1. [`decide_outcome`] reads the candidate set, rig table and round counter
//!    and returns a [`Resolution`]: the [`Decision`] plus the [`Outcome`] it
//!    implies. Nothing is mutated except the RNG.
//! 2. [`Outcome::apply`] performs every state change of that spin in one go.
//!    It cannot fail, so a spin is either fully applied or not at all.
//!
//! ## Selection order
//!
//! - A rig entry for the round being played wins, if its target is still on
//!   the wheel.
//! - Otherwise a uniform pick among candidates not reserved for a later round.
//! - If every candidate is reserved for a later round, a uniform pick among all.
//!
//! ## Example
//!
//! ```
//! use raffle_wheel::core::{GameMode, SpinRng};
//! use raffle_wheel::resolver::decide_outcome;
//! use raffle_wheel::rig::RigTable;
//! use raffle_wheel::round::RoundCounter;
//! use raffle_wheel::wheel::CandidateSet;
//!
//! let mut candidates = CandidateSet::new();
//! let _a = candidates.add_labeled("A");
//! let b = candidates.add_labeled("B");
//!
//! let mut rig = RigTable::new();
//! rig.set(1, b).unwrap();
//!
//! let mut counter = RoundCounter::new();
//! let mut rng = SpinRng::new(42);
//!
//! let resolution = decide_outcome(&candidates, &rig, counter, GameMode::Immediate, true, &mut rng).unwrap();
//! assert_eq!(resolution.decision.selected, b);
//! assert!(resolution.decision.is_winner);
//!
//! resolution.outcome.apply(&mut candidates, &mut rig, &mut counter);
//! assert!(!candidates.contains(b));
//! assert!(rig.is_empty());
//! assert_eq!(counter.completed(), 1);
//! ```

mod decide;

pub use decide::decide_outcome;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::candidate::CandidateId;
use crate::rig::RigTable;
use crate::round::RoundCounter;
use crate::wheel::CandidateSet;

/// How the rig table influenced a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RigStatus {
    /// No entry for this round; random pick.
    Unrigged,
    /// The entry for this round selected the candidate.
    Forced,
    /// The entry for this round named a candidate no longer on the wheel;
    /// random pick.
    Stale(CandidateId),
}

/// What a spin selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Round resolved (1-based within the cycle).
    pub round: u32,

    /// Selected candidate.
    pub selected: CandidateId,

    /// Final winner (true) or intermediate elimination (false).
    pub is_winner: bool,

    /// Secondary announcement line (elimination mode only).
    pub subtext: Option<String>,

    /// Rig influence on this pick.
    pub rig_status: RigStatus,

    /// Every candidate was reserved for a later round, so a reservation
    /// had to be broken.
    pub all_protected: bool,
}

/// Rig table change caused by a spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RigMutation {
    /// Drop only the entry for the resolved round.
    Consume(u32),
    /// Cycle finished: drop everything.
    ClearAll,
}

/// State changes implied by a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Counter value after the spin.
    pub next_counter: RoundCounter,

    /// Rig table change.
    pub rig: RigMutation,

    /// Candidate leaving the wheel, if any.
    pub remove: Option<CandidateId>,
}

impl Outcome {
    /// Apply every state change of the spin.
    ///
    /// Removal also purges rig entries targeting the removed candidate.
    pub fn apply(&self, candidates: &mut CandidateSet, rig: &mut RigTable, counter: &mut RoundCounter) {
        match self.rig {
            RigMutation::Consume(round) => {
                rig.consume(round);
            }
            RigMutation::ClearAll => {
                info!(dropped = rig.len(), "cycle finished, clearing rig table");
                rig.clear();
            }
        }

        if let Some(id) = self.remove {
            if let Some(removed) = candidates.remove(id) {
                info!(
                    %id,
                    label = %removed.label,
                    remaining = candidates.len(),
                    "candidate removed from wheel"
                );
            }
            rig.purge_candidate(id);
        }

        *counter = self.next_counter;
    }
}

/// A decision and the state changes it implies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub decision: Decision,
    pub outcome: Outcome,
}
