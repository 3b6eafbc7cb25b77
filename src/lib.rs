//! Tournament fixture manager: library with models and business logic.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    apply_match_update, generate_fixtures, group_players, groups_csv, import_players_csv,
    match_results_csv, players_csv, round_robin_matches, upload_custom_fixtures, FixtureError,
    GroupingError, ImportError, ImportReport, MatchUpdate, MatchUpdateError, StatusRequest,
    SCORE_EDIT_REASON,
};
pub use models::{
    CategoryFixture, Group, GroupId, Match, MatchHistoryEntry, MatchId, MatchOutcome, MatchStatus,
    Player, PlayerId, TournamentData, TournamentError, TournamentSettings,
};
