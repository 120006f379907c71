//! Binary checkpoints of a session.
//!
//! A snapshot captures the three stores, settings, rotation and the RNG
//! position, so a restored session continues the exact same random
//! sequence. A spin in flight is not captured; restoring is equivalent to
//! aborting it.

use serde::{Deserialize, Serialize};

use crate::core::config::Settings;
use crate::core::rng::{SpinRng, SpinRngState};
use crate::rig::RigTable;
use crate::round::RoundCounter;
use crate::storage::StorageError;
use crate::wheel::CandidateSet;

use super::{Session, SpinPhase};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub candidates: CandidateSet,
    pub rig: RigTable,
    pub counter: RoundCounter,
    pub settings: Settings,
    pub rng: SpinRngState,
    pub rotation: f64,
}

impl SessionSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Session {
    /// Capture the current state.
    ///
    /// Cloning the candidate set is O(n); the rig table is a persistent map
    /// and clones in O(1).
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            candidates: self.candidates.clone(),
            rig: self.rig.clone(),
            counter: self.counter,
            settings: self.settings.clone(),
            rng: self.spin_checkpoint.clone().unwrap_or_else(|| self.rng.state()),
            rotation: self.rotation,
        }
    }

    /// Rebuild a session from a snapshot.
    #[must_use]
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        Self {
            candidates: snapshot.candidates,
            rig: snapshot.rig,
            counter: snapshot.counter,
            settings: snapshot.settings,
            rng: SpinRng::from_state(&snapshot.rng),
            phase: SpinPhase::Idle,
            rotation: snapshot.rotation,
            spin_checkpoint: None,
        }
    }
}
