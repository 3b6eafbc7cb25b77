//! Match, status, outcome, and audit history for round-robin fixtures.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Stored status of a match.
///
/// Walkovers and disqualifications are stored as `Completed` with canonical
/// score pairs; the reason lives in [`MatchOutcome`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

impl MatchStatus {
    /// Wire/display form ("scheduled", "in-progress", "completed").
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::InProgress => "in-progress",
            MatchStatus::Completed => "completed",
        }
    }
}

/// Why a completed match ended without being played out.
///
/// A walkover is stored as 1-0 / 0-1 and a disqualification as 0-0, which a
/// genuine result can also produce; this tag keeps the two distinguishable.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    WalkoverP1,
    WalkoverP2,
    Disqualified,
}

/// One entry in a match's audit history: a single state transition.
/// Appended by score/status updates, never edited or removed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryEntry {
    pub timestamp: DateTime<Utc>,
    /// Actor label ("Admin" for dashboard edits).
    pub changed_by: String,
    pub old_score1: Option<u32>,
    pub old_score2: Option<u32>,
    pub old_status: MatchStatus,
    pub new_score1: Option<u32>,
    pub new_score2: Option<u32>,
    pub new_status: MatchStatus,
    pub reason: String,
}

/// A single round-robin match between two players of the same group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub category: String,
    pub tournament_type: String,
    pub group_name: String,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    /// `None` until a score is entered.
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MatchOutcome>,
    /// Audit log; externally supplied fixtures may omit it, so it defaults to empty.
    #[serde(default)]
    pub history: Vec<MatchHistoryEntry>,
}

impl Match {
    /// Create a scheduled match with unset scores and empty history.
    pub fn new(
        category: impl Into<String>,
        tournament_type: impl Into<String>,
        group_name: impl Into<String>,
        player1_id: PlayerId,
        player2_id: PlayerId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            tournament_type: tournament_type.into(),
            group_name: group_name.into(),
            player1_id,
            player2_id,
            score1: None,
            score2: None,
            status: MatchStatus::Scheduled,
            outcome: None,
            history: Vec::new(),
        }
    }

    /// Whether the given player takes part in this match.
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }
}
