//! Core engine types: candidates, RNG, game mode, settings, errors.
//!
//! This module contains the building blocks shared by every other module.
//! Nothing here knows about rounds or rigging.

pub mod candidate;
pub mod rng;
pub mod config;
pub mod error;

pub use candidate::{Candidate, CandidateId};
pub use rng::{SpinRng, SpinRngState};
pub use config::{GameMode, WinCondition, Settings};
pub use error::ResolveError;
