//! Fixture business logic: grouping, pairing, scoring, import/export.

mod export;
mod fixtures;
mod grouping;
mod import;
mod pairing;
mod scoring;

pub use export::{groups_csv, match_results_csv, players_csv};
pub use fixtures::{generate_fixtures, upload_custom_fixtures, FixtureError};
pub use grouping::{group_players, GroupingError};
pub use import::{import_players_csv, ImportError, ImportReport};
pub use pairing::round_robin_matches;
pub use scoring::{
    apply_match_update, MatchUpdate, MatchUpdateError, StatusRequest, SCORE_EDIT_REASON,
};
