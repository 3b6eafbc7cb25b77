//! Data model: players, groups, matches, fixtures, and the tournament aggregate.

pub mod fixture;
pub mod game;
pub mod player;
pub mod tournament;

pub use fixture::{CategoryFixture, Group, GroupId};
pub use game::{Match, MatchHistoryEntry, MatchId, MatchOutcome, MatchStatus};
pub use player::{Player, PlayerId, MAX_CATEGORIES_PER_PLAYER};
pub use tournament::{TournamentData, TournamentError, TournamentSettings};
