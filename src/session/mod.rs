//! Game session: the single owner of all mutable wheel state.
//!
//! ## Session
//!
//! Owns:
//! - The candidate set
//! - The rig table
//! - The round counter
//! - Settings
//! - The injected RNG
//! - The spin phase and current wheel rotation
//!
//! ## Spin lifecycle
//!
//! ```text
//!   Idle --begin_spin--> Spinning --finish_spin--> Idle   (outcome applied)
//!                           |
//!                           +------abort_spin----> Idle   (nothing applied)
//! ```
//!
//! The outcome is decided in `begin_spin` so the caller can animate towards
//! it. While spinning, every mutating operation is refused with
//! [`ResolveError::SpinInProgress`].

mod announce;
mod persist;
mod snapshot;

pub use announce::{Announcement, AnnouncementKind};
pub use snapshot::SessionSnapshot;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::candidate::{Candidate, CandidateId};
use crate::core::config::{GameMode, Settings};
use crate::core::error::ResolveError;
use crate::core::rng::{SpinRng, SpinRngState};
use crate::resolver::{decide_outcome, Decision, Resolution};
use crate::rig::RigTable;
use crate::round::RoundCounter;
use crate::wheel::geometry::{normalize, SpinPlan};
use crate::wheel::CandidateSet;

/// A spin whose outcome is decided but not yet applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingSpin {
    pub resolution: Resolution,
    pub plan: SpinPlan,
}

impl PendingSpin {
    #[must_use]
    pub fn decision(&self) -> &Decision {
        &self.resolution.decision
    }
}

/// Where the session is in the spin lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SpinPhase {
    /// Ready for a spin or for edits.
    #[default]
    Idle,
    /// Wheel in motion towards a decided outcome.
    Spinning(PendingSpin),
}

/// Session context for one wheel.
///
/// ## Example
///
/// ```
/// use raffle_wheel::{GameMode, Session, Settings};
///
/// let settings = Settings::default().with_game_mode(GameMode::EliminateAfterN(2));
/// let mut session = Session::new(settings, 42);
///
/// let first = session.spin().unwrap();
/// assert!(!first.is_winner());
///
/// let second = session.spin().unwrap();
/// assert!(second.is_winner());
/// assert_eq!(session.candidates().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    candidates: CandidateSet,
    rig: RigTable,
    counter: RoundCounter,
    settings: Settings,
    rng: SpinRng,
    phase: SpinPhase,
    rotation: f64,

    /// RNG position before the spin in flight, rewound to on abort.
    spin_checkpoint: Option<SpinRngState>,
}

impl Session {
    /// Create a session with the default three-option wheel.
    #[must_use]
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_candidates(CandidateSet::with_defaults(), settings, seed)
    }

    /// Create a session over an existing candidate set.
    #[must_use]
    pub fn with_candidates(candidates: CandidateSet, settings: Settings, seed: u64) -> Self {
        Self {
            candidates,
            rig: RigTable::new(),
            counter: RoundCounter::new(),
            settings,
            rng: SpinRng::new(seed),
            phase: SpinPhase::Idle,
            rotation: 0.0,
            spin_checkpoint: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[must_use]
    pub fn rig(&self) -> &RigTable {
        &self.rig
    }

    #[must_use]
    pub fn counter(&self) -> RoundCounter {
        self.counter
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning(_))
    }

    /// Current wheel rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Effective game mode.
    #[must_use]
    pub fn game_mode(&self) -> GameMode {
        self.settings.game_mode()
    }

    /// The draw the next spin resolves (1-based).
    #[must_use]
    pub fn current_draw(&self) -> u32 {
        self.counter.next_round()
    }

    /// Check if the next spin produces the cycle winner.
    ///
    /// Always true in immediate mode.
    #[must_use]
    pub fn is_final_draw(&self) -> bool {
        match self.game_mode() {
            GameMode::Immediate => true,
            GameMode::EliminateAfterN(n) => self.current_draw() >= n,
        }
    }

    // === Candidates ===

    /// Add a segment with the given label.
    pub fn add_candidate(&mut self, label: impl Into<String>) -> Result<CandidateId, ResolveError> {
        self.ensure_idle()?;
        Ok(self.candidates.add_labeled(label))
    }

    /// Add a segment labeled `Option <n>`.
    pub fn add_default_candidate(&mut self) -> Result<CandidateId, ResolveError> {
        self.ensure_idle()?;
        Ok(self.candidates.add_default())
    }

    /// Change a segment's label. Blank labels are ignored.
    pub fn rename_candidate(&mut self, id: CandidateId, label: &str) -> Result<(), ResolveError> {
        self.ensure_idle()?;
        if self.candidates.rename(id, label) {
            Ok(())
        } else {
            Err(ResolveError::NoSuchCandidate(id))
        }
    }

    /// Remove a segment and every rig entry targeting it.
    pub fn remove_candidate(&mut self, id: CandidateId) -> Result<Candidate, ResolveError> {
        self.ensure_idle()?;
        let removed = self
            .candidates
            .remove(id)
            .ok_or(ResolveError::NoSuchCandidate(id))?;
        self.rig.purge_candidate(id);
        Ok(removed)
    }

    /// Empty the wheel. Also resets the counter and the rig table.
    pub fn clear_candidates(&mut self) -> Result<(), ResolveError> {
        self.ensure_idle()?;
        self.candidates.clear();
        self.counter.reset();
        self.rig.clear();
        info!("wheel cleared");
        Ok(())
    }

    /// Back to the default three-option wheel, counter and rig table reset.
    pub fn reset_to_defaults(&mut self) -> Result<(), ResolveError> {
        self.ensure_idle()?;
        self.candidates = CandidateSet::with_defaults();
        self.counter.reset();
        self.rig.clear();
        info!("wheel reset to defaults");
        Ok(())
    }

    // === Rigging ===

    /// Force `candidate` to be selected in `round`.
    ///
    /// Returns the previously reserved candidate for that round, if any.
    pub fn set_rig(&mut self, round: u32, candidate: CandidateId) -> Result<Option<CandidateId>, ResolveError> {
        self.ensure_idle()?;
        if round == 0 {
            return Err(ResolveError::InvalidRigRound(round));
        }
        if !self.candidates.contains(candidate) {
            return Err(ResolveError::NoSuchCandidate(candidate));
        }
        let previous = self.rig.set(round, candidate)?;
        info!(round, %candidate, "rig entry set");
        Ok(previous)
    }

    /// Remove the rig entry for `round`. No-op if absent.
    pub fn clear_rig(&mut self, round: u32) -> Result<Option<CandidateId>, ResolveError> {
        self.ensure_idle()?;
        Ok(self.rig.clear_round(round))
    }

    // === Round counter and settings ===

    /// Restart the current cycle.
    pub fn reset_round_counter(&mut self) -> Result<(), ResolveError> {
        self.ensure_idle()?;
        self.counter.reset();
        Ok(())
    }

    /// Save the win condition.
    ///
    /// Always restarts the cycle, even when the mode is unchanged.
    pub fn set_game_mode(&mut self, mode: GameMode) -> Result<(), ResolveError> {
        if let GameMode::EliminateAfterN(n) = mode {
            GameMode::eliminate_after(n)?;
        }
        self.update_settings(|s| s.set_game_mode(mode))?;
        self.counter.reset();
        Ok(())
    }

    /// Edit settings in place.
    ///
    /// The cycle restarts when the game mode changes or when
    /// `remove_once_chosen` is switched off.
    pub fn update_settings(&mut self, edit: impl FnOnce(&mut Settings)) -> Result<(), ResolveError> {
        self.ensure_idle()?;
        let before = self.game_mode();
        let was_removing = self.settings.remove_once_chosen;
        edit(&mut self.settings);
        self.settings.volume = self.settings.volume.min(100);

        let after = self.game_mode();
        if after != before {
            debug!(%before, %after, "mode switched, restarting cycle");
            self.counter.reset();
        } else if was_removing && !self.settings.remove_once_chosen {
            debug!("removal switched off, restarting cycle");
            self.counter.reset();
        }
        Ok(())
    }

    // === Spinning ===

    /// Decide the next outcome and start spinning towards it.
    pub fn begin_spin(&mut self) -> Result<PendingSpin, ResolveError> {
        self.ensure_idle()?;
        let checkpoint = self.rng.state();

        let resolution = decide_outcome(
            &self.candidates,
            &self.rig,
            self.counter,
            self.game_mode(),
            self.settings.remove_once_chosen,
            &mut self.rng,
        )?;

        let index = self
            .candidates
            .index_of(resolution.decision.selected)
            .ok_or(ResolveError::NoSuchCandidate(resolution.decision.selected))?;
        let mut motion = self.rng.for_context("motion");
        let plan = SpinPlan::random(&mut motion, self.rotation, index, self.candidates.len());

        let pending = PendingSpin { resolution, plan };
        self.phase = SpinPhase::Spinning(pending.clone());
        self.spin_checkpoint = Some(checkpoint);
        Ok(pending)
    }

    /// Land the wheel and apply the decided outcome.
    pub fn finish_spin(&mut self) -> Result<Announcement, ResolveError> {
        let SpinPhase::Spinning(pending) = std::mem::take(&mut self.phase) else {
            return Err(ResolveError::NoSpinInProgress);
        };
        self.spin_checkpoint = None;

        let decision = &pending.resolution.decision;
        let label = self
            .candidates
            .get(decision.selected)
            .map(|c| c.label.clone())
            .unwrap_or_default();
        let announcement = Announcement::from_decision(decision, label);

        pending
            .resolution
            .outcome
            .apply(&mut self.candidates, &mut self.rig, &mut self.counter);
        self.rotation = pending.plan.final_rotation;

        Ok(announcement)
    }

    /// Stop the wheel at `at_rotation` without applying anything.
    ///
    /// The RNG is rewound to where it was before `begin_spin`, so the next
    /// spin decides exactly as the aborted one would have. Only allowed when
    /// tap-to-stop is enabled.
    pub fn abort_spin(&mut self, at_rotation: f64) -> Result<(), ResolveError> {
        if !self.is_spinning() {
            return Err(ResolveError::NoSpinInProgress);
        }
        if !self.settings.tap_to_stop {
            return Err(ResolveError::TapToStopDisabled);
        }
        self.phase = SpinPhase::Idle;
        if let Some(checkpoint) = self.spin_checkpoint.take() {
            self.rng = SpinRng::from_state(&checkpoint);
        }
        self.rotation = normalize(at_rotation);
        debug!(rotation = self.rotation, "spin aborted");
        Ok(())
    }

    /// Decide and apply the next outcome in one step.
    pub fn spin(&mut self) -> Result<Announcement, ResolveError> {
        self.begin_spin()?;
        self.finish_spin()
    }

    fn ensure_idle(&self) -> Result<(), ResolveError> {
        if self.is_spinning() {
            return Err(ResolveError::SpinInProgress);
        }
        Ok(())
    }
}
