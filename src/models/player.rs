//! Player registration data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in groups, matches and lookups).
pub type PlayerId = Uuid;

/// A player may register in at most this many categories.
pub const MAX_CATEGORIES_PER_PLAYER: usize = 2;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Contact key; unique across all registrations.
    pub mobile: String,
    /// Categories the player competes in (1 to 2 entries, each defined in settings).
    pub categories: Vec<String>,
    pub fee_paid: bool,
}

impl Player {
    /// Create a new player with a fresh id.
    pub fn new(
        name: impl Into<String>,
        mobile: impl Into<String>,
        categories: Vec<String>,
        fee_paid: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mobile: mobile.into(),
            categories,
            fee_paid,
        }
    }

    /// Whether this player is eligible for fixtures in the given category.
    pub fn is_in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}
