//! Error type for resolution, rigging and the spin lifecycle.
//!
//! A rig entry pointing at a removed candidate is not an error: the resolver
//! recovers by falling back to random selection and reports it through
//! [`RigStatus::Stale`](crate::resolver::RigStatus::Stale).

use thiserror::Error;

use super::candidate::CandidateId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("cannot resolve a spin with no candidates")]
    EmptyCandidateSet,
    #[error("rig round must be at least 1 (got {0})")]
    InvalidRigRound(u32),
    #[error("no candidate with id {0}")]
    NoSuchCandidate(CandidateId),
    #[error("winning N must be at least 2 (got {0})")]
    InvalidWinningN(u32),
    #[error("a spin is already in progress")]
    SpinInProgress,
    #[error("no spin in progress")]
    NoSpinInProgress,
    #[error("tap to stop is disabled")]
    TapToStopDisabled,
}
