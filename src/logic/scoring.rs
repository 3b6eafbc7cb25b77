//! Match lifecycle: score/status updates with validation and audit history.

use crate::models::{Match, MatchHistoryEntry, MatchOutcome, MatchStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Reason recorded for plain score edits.
pub const SCORE_EDIT_REASON: &str = "Scores updated";

/// Status value as requested by the admin. Walkovers and disqualifications are
/// requests, not stored states; they coerce into `Completed` with canonical
/// scores and an outcome tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusRequest {
    Scheduled,
    #[serde(rename = "in-progress")]
    InProgress,
    Completed,
    WalkoverP1,
    WalkoverP2,
    Disqualified,
}

/// One update to a match: exactly one field changes per submission.
/// Score inputs arrive as raw numbers; `None` means "unset".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchUpdate {
    Score1(Option<i64>),
    Score2(Option<i64>),
    Status(StatusRequest),
}

/// Errors from applying a match update.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchUpdateError {
    /// A completed match needs both scores set; the update was rejected and
    /// the match left unchanged.
    ScoresRequired,
}

impl std::fmt::Display for MatchUpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchUpdateError::ScoresRequired => write!(
                f,
                "Scores are required for both players when marking a match as completed"
            ),
        }
    }
}

/// Negative input clamps to 0; absent input stays unset.
fn clamp_score(value: Option<i64>) -> Option<u32> {
    value.map(|v| v.clamp(0, u32::MAX as i64) as u32)
}

/// Apply one update to a match.
///
/// Special statuses coerce scores first (walkover 1-0 / 0-1, disqualification
/// 0-0, all stored as completed); moving back to scheduled or in-progress
/// clears both scores. The completed-needs-both-scores gate runs after the
/// coercion, so coerced values always pass. A history entry is appended only
/// when the resulting state actually differs; no-op updates append nothing.
///
/// Returns whether the match changed. On error the match is untouched.
pub fn apply_match_update(
    m: &mut Match,
    update: MatchUpdate,
    changed_by: &str,
) -> Result<bool, MatchUpdateError> {
    let mut new_score1 = m.score1;
    let mut new_score2 = m.score2;
    let mut new_status = m.status;
    let mut new_outcome = m.outcome;
    let is_status_edit = matches!(update, MatchUpdate::Status(_));

    match update {
        MatchUpdate::Score1(value) => new_score1 = clamp_score(value),
        MatchUpdate::Score2(value) => new_score2 = clamp_score(value),
        MatchUpdate::Status(request) => match request {
            StatusRequest::WalkoverP1 => {
                new_score1 = Some(1);
                new_score2 = Some(0);
                new_status = MatchStatus::Completed;
                new_outcome = Some(MatchOutcome::WalkoverP1);
            }
            StatusRequest::WalkoverP2 => {
                new_score1 = Some(0);
                new_score2 = Some(1);
                new_status = MatchStatus::Completed;
                new_outcome = Some(MatchOutcome::WalkoverP2);
            }
            StatusRequest::Disqualified => {
                new_score1 = Some(0);
                new_score2 = Some(0);
                new_status = MatchStatus::Completed;
                new_outcome = Some(MatchOutcome::Disqualified);
            }
            StatusRequest::Scheduled => {
                new_score1 = None;
                new_score2 = None;
                new_status = MatchStatus::Scheduled;
                new_outcome = None;
            }
            StatusRequest::InProgress => {
                new_score1 = None;
                new_score2 = None;
                new_status = MatchStatus::InProgress;
                new_outcome = None;
            }
            StatusRequest::Completed => {
                new_status = MatchStatus::Completed;
                new_outcome = None;
            }
        },
    }

    if new_status == MatchStatus::Completed && (new_score1.is_none() || new_score2.is_none()) {
        return Err(MatchUpdateError::ScoresRequired);
    }

    let changed = new_score1 != m.score1
        || new_score2 != m.score2
        || new_status != m.status
        || new_outcome != m.outcome;
    if !changed {
        return Ok(false);
    }

    let reason = if is_status_edit {
        format!("Status changed to {}", new_status.as_str().to_uppercase())
    } else {
        SCORE_EDIT_REASON.to_string()
    };
    m.history.push(MatchHistoryEntry {
        timestamp: Utc::now(),
        changed_by: changed_by.to_string(),
        old_score1: m.score1,
        old_score2: m.score2,
        old_status: m.status,
        new_score1,
        new_score2,
        new_status,
        reason,
    });
    m.score1 = new_score1;
    m.score2 = new_score2;
    m.status = new_status;
    m.outcome = new_outcome;
    Ok(true)
}
