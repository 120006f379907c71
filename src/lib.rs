//! # raffle-wheel
//!
//! Outcome resolution engine for a round-based prize wheel.
//!
//! ## Design Principles
//!
//! 1. **Render-Agnostic**: No animation, audio, or DOM concerns. Callers drive
//!    those and ask the engine what happened.
//!
//! 2. **Injected Randomness**: Every random choice goes through a seedable
//!    [`SpinRng`], so rigged and protected outcomes are testable.
//!
//! 3. **Explicit Session**: The candidate set, rig table and round counter live
//!    in one [`Session`] owned by the caller. Persistence is a boundary
//!    operation over a [`KeyValueStore`].
//!
//! ## Modules
//!
//! - `core`: Candidate IDs, RNG, game mode, settings, errors
//! - `wheel`: Candidate set and wheel geometry
//! - `rig`: Pre-committed outcomes keyed by round
//! - `round`: Round counter state machine
//! - `resolver`: Per-spin outcome decision
//! - `session`: Session context, spin lifecycle, snapshots
//! - `storage`: Key-value persistence boundary

pub mod core;
pub mod wheel;
pub mod rig;
pub mod round;
pub mod resolver;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    CandidateId, Candidate,
    SpinRng, SpinRngState,
    GameMode, WinCondition, Settings,
    ResolveError,
};

pub use crate::wheel::{CandidateSet, SpinPlan, DEFAULT_PALETTE};

pub use crate::rig::RigTable;

pub use crate::round::RoundCounter;

pub use crate::resolver::{
    decide_outcome, Decision, Outcome, Resolution, RigMutation, RigStatus,
};

pub use crate::session::{
    Announcement, AnnouncementKind, PendingSpin, Session, SessionSnapshot, SpinPhase,
};

pub use crate::storage::{KeyValueStore, MemoryStore, StorageError};
