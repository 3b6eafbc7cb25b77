//! Groups and per-(category, type) fixtures.

use crate::models::game::Match;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// A round-robin group: every member plays every other member once.
/// Created only by the grouping engine; shrinks only via player deletion.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Generated display name ("Group A", "Group B", ...).
    pub name: String,
    pub player_ids: Vec<PlayerId>,
}

/// All groups and matches for one (category, tournament type) pair.
/// At most one fixture exists per key; regenerating or uploading replaces it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryFixture {
    pub category: String,
    pub tournament_type: String,
    pub groups: Vec<Group>,
    pub matches: Vec<Match>,
}

impl CategoryFixture {
    /// The replace-by-key identity of this fixture.
    pub fn key(&self) -> (&str, &str) {
        (&self.category, &self.tournament_type)
    }

    /// Whether this fixture is for the given (category, type) pair.
    pub fn is_for(&self, category: &str, tournament_type: &str) -> bool {
        self.category == category && self.tournament_type == tournament_type
    }
}
