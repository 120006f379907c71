//! Announcement shown when the wheel lands.

use serde::{Deserialize, Serialize};

use crate::resolver::Decision;

/// Winner or elimination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementKind {
    Winner,
    Eliminated,
}

/// Text for the result banner.
///
/// Presentation (confetti, sounds) is keyed off `kind` by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Label of the selected candidate.
    pub text: String,
    pub kind: AnnouncementKind,
    pub subtext: Option<String>,
    /// Round that produced this result.
    pub round: u32,
}

impl Announcement {
    /// Build from a decision and the selected candidate's label.
    #[must_use]
    pub fn from_decision(decision: &Decision, label: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            kind: if decision.is_winner {
                AnnouncementKind::Winner
            } else {
                AnnouncementKind::Eliminated
            },
            subtext: decision.subtext.clone(),
            round: decision.round,
        }
    }

    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.kind == AnnouncementKind::Winner
    }
}
