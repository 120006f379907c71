//! Game mode and persisted user settings.
//!
//! - `GameMode`: How a selection is interpreted (winner or elimination)
//! - `WinCondition`: The persisted form of the mode selector
//! - `Settings`: Everything the user can configure, with defaults
//!
//! Settings deserialize field by field over the defaults, so a stored record
//! from an older build with missing keys still loads.

use serde::{Deserialize, Serialize};

use super::error::ResolveError;

/// Smallest N accepted for elimination mode.
pub const MIN_WINNING_N: u32 = 2;

/// How each selection is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Every selection is a winner.
    #[default]
    Immediate,
    /// The first `n - 1` selections of a cycle are eliminated, the `n`-th wins.
    EliminateAfterN(u32),
}

impl GameMode {
    /// Build an elimination mode, rejecting `n < 2`.
    pub fn eliminate_after(n: u32) -> Result<Self, ResolveError> {
        if n < MIN_WINNING_N {
            return Err(ResolveError::InvalidWinningN(n));
        }
        Ok(Self::EliminateAfterN(n))
    }

    /// Check if this is an elimination mode.
    #[must_use]
    pub const fn is_elimination(self) -> bool {
        matches!(self, Self::EliminateAfterN(_))
    }

    /// Cycle length, if any.
    #[must_use]
    pub const fn winning_n(self) -> Option<u32> {
        match self {
            Self::Immediate => None,
            Self::EliminateAfterN(n) => Some(n),
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::EliminateAfterN(n) => write!(f, "win after {n}"),
        }
    }
}

/// Persisted win condition selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// Every spin produces a winner.
    #[default]
    Immediate,
    /// Winner on the N-th spin of a cycle.
    AfterNTimes,
}

/// User configuration.
///
/// ## Defaults
///
/// - 5 second spins, drum roll music, cymbal decision sound
/// - Immediate mode with `winning_n = 2` ready for when elimination is chosen
/// - `remove_once_chosen` on, `tap_to_stop` off
/// - Dark mode, Spanish, volume 50
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // === Wheel ===
    /// Spin animation length in seconds.
    pub spin_duration: u32,

    /// Background music track key (`"none"` disables).
    pub background_music: String,

    /// Sound played on decision (`"none"` disables).
    pub decision_sound: String,

    /// Visual effect key played near the end of a spin.
    pub effect: String,

    /// Tick frequency boost, percent.
    pub effect_frequency: u32,

    /// Remove the selected candidate in immediate mode.
    pub remove_once_chosen: bool,

    /// Allow aborting a spin in flight.
    pub tap_to_stop: bool,

    // === Win condition ===
    pub winning_condition: WinCondition,

    /// Cycle length for `AfterNTimes`.
    pub winning_n: u32,

    // === General ===
    pub dark_mode: bool,
    pub password_protection: bool,
    pub language: String,

    /// 0-100.
    pub volume: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spin_duration: 5,
            background_music: "drum_roll_1".to_string(),
            decision_sound: "sfx_cymbal_1".to_string(),
            effect: "change_1_before".to_string(),
            effect_frequency: 0,
            remove_once_chosen: true,
            tap_to_stop: false,
            winning_condition: WinCondition::Immediate,
            winning_n: MIN_WINNING_N,
            dark_mode: true,
            password_protection: false,
            language: "es".to_string(),
            volume: 50,
        }
    }
}

impl Settings {
    /// Effective game mode.
    ///
    /// A stored `winning_n` below 2 is clamped to 2.
    #[must_use]
    pub fn game_mode(&self) -> GameMode {
        match self.winning_condition {
            WinCondition::Immediate => GameMode::Immediate,
            WinCondition::AfterNTimes => {
                GameMode::EliminateAfterN(self.winning_n.max(MIN_WINNING_N))
            }
        }
    }

    /// Spin duration in milliseconds.
    #[must_use]
    pub fn spin_duration_ms(&self) -> u64 {
        u64::from(self.spin_duration) * 1000
    }

    /// Set the game mode. Immediate keeps the last `winning_n`.
    #[must_use]
    pub fn with_game_mode(mut self, mode: GameMode) -> Self {
        self.set_game_mode(mode);
        self
    }

    /// In-place form of [`with_game_mode`](Self::with_game_mode).
    pub fn set_game_mode(&mut self, mode: GameMode) {
        match mode {
            GameMode::Immediate => self.winning_condition = WinCondition::Immediate,
            GameMode::EliminateAfterN(n) => {
                self.winning_condition = WinCondition::AfterNTimes;
                self.winning_n = n.max(MIN_WINNING_N);
            }
        }
    }

    #[must_use]
    pub fn with_remove_once_chosen(mut self, remove: bool) -> Self {
        self.remove_once_chosen = remove;
        self
    }

    #[must_use]
    pub fn with_tap_to_stop(mut self, enabled: bool) -> Self {
        self.tap_to_stop = enabled;
        self
    }

    #[must_use]
    pub fn with_spin_duration(mut self, seconds: u32) -> Self {
        self.spin_duration = seconds;
        self
    }

    /// Set volume, clamped to 100.
    #[must_use]
    pub fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume.min(100);
        self
    }
}
