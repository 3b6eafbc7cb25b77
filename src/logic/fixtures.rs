//! Fixture aggregation: generating and uploading per-(category, type) fixtures.

use crate::logic::grouping::{group_players, GroupingError};
use crate::logic::pairing::round_robin_matches;
use crate::models::{CategoryFixture, PlayerId, TournamentData, TournamentError};
use rand::Rng;

/// Errors from fixture generation or custom upload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FixtureError {
    /// Grouping failed (not enough players, infeasible bounds, or an
    /// internal size-invariant violation).
    Grouping(GroupingError),
    /// The requested category or type is not defined in settings.
    Tournament(TournamentError),
    /// An uploaded fixture has an empty category or tournament type.
    InvalidCustomFixture { index: usize },
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::Grouping(e) => write!(f, "{}", e),
            FixtureError::Tournament(e) => write!(f, "{}", e),
            FixtureError::InvalidCustomFixture { index } => write!(
                f,
                "Uploaded fixture #{} is missing a category or tournament type",
                index + 1
            ),
        }
    }
}

impl From<GroupingError> for FixtureError {
    fn from(e: GroupingError) -> Self {
        FixtureError::Grouping(e)
    }
}

impl From<TournamentError> for FixtureError {
    fn from(e: TournamentError) -> Self {
        FixtureError::Tournament(e)
    }
}

/// Generate groups and round-robin matches for one (category, type) pair and
/// replace any existing fixture under the same key. Other keys are untouched;
/// on any error the aggregate is left unchanged.
pub fn generate_fixtures<R: Rng + ?Sized>(
    data: &mut TournamentData,
    category: &str,
    tournament_type: &str,
    rng: &mut R,
) -> Result<(), FixtureError> {
    if !data.settings.categories.iter().any(|c| c == category) {
        return Err(TournamentError::UnknownCategory(category.to_string()).into());
    }
    if !data.settings.types.iter().any(|t| t == tournament_type) {
        return Err(TournamentError::UnknownType(tournament_type.to_string()).into());
    }

    let eligible: Vec<PlayerId> = data
        .players
        .iter()
        .filter(|p| p.is_in_category(category))
        .map(|p| p.id)
        .collect();

    let groups = group_players(
        &eligible,
        data.settings.min_group_size,
        data.settings.max_group_size,
        rng,
    )?;

    let mut matches = Vec::new();
    for group in &groups {
        matches.extend(round_robin_matches(group, category, tournament_type));
    }

    data.replace_fixture(CategoryFixture {
        category: category.to_string(),
        tournament_type: tournament_type.to_string(),
        groups,
        matches,
    });
    Ok(())
}

/// Install externally supplied fixtures, replacing existing ones key by key.
///
/// Every entry must carry a non-empty category and tournament type or the
/// whole upload is rejected. Match histories are initialized to empty by
/// deserialization when the upload omits them.
pub fn upload_custom_fixtures(
    data: &mut TournamentData,
    fixtures: Vec<CategoryFixture>,
) -> Result<(), FixtureError> {
    for (index, fixture) in fixtures.iter().enumerate() {
        if fixture.category.trim().is_empty() || fixture.tournament_type.trim().is_empty() {
            return Err(FixtureError::InvalidCustomFixture { index });
        }
    }
    for fixture in fixtures {
        data.replace_fixture(fixture);
    }
    Ok(())
}
