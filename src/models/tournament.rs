//! TournamentData: the single aggregate owning settings, players and fixtures.

use crate::models::fixture::CategoryFixture;
use crate::models::game::{Match, MatchId};
use crate::models::player::{Player, PlayerId, MAX_CATEGORIES_PER_PLAYER};
use serde::{Deserialize, Serialize};

/// Errors that can occur during tournament administration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament name is empty after trimming.
    EmptyName,
    /// No tournament types selected in settings.
    NoTypes,
    /// No player categories selected in settings.
    NoCategories,
    /// Group size bounds are unusable (need 0 < min <= max).
    InvalidGroupSizes { min: usize, max: usize },
    /// Player is missing a name, mobile number, or category.
    MissingPlayerFields,
    /// Player selected more categories than allowed.
    TooManyCategories,
    /// A category is not defined in tournament settings.
    UnknownCategory(String),
    /// A tournament type is not defined in tournament settings.
    UnknownType(String),
    /// A player with this mobile number already exists.
    DuplicateMobile(String),
    /// Player not found in the registration list.
    PlayerNotFound(PlayerId),
    /// Match not found in any fixture.
    MatchNotFound(MatchId),
    /// Publishing prerequisites are not met.
    NotReadyToPublish { reason: &'static str },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyName => write!(f, "Tournament name cannot be empty"),
            TournamentError::NoTypes => write!(f, "Select at least one tournament type"),
            TournamentError::NoCategories => write!(f, "Select at least one player category"),
            TournamentError::InvalidGroupSizes { min, max } => {
                write!(f, "Invalid group size bounds (min: {}, max: {})", min, max)
            }
            TournamentError::MissingPlayerFields => {
                write!(f, "Player name, mobile number and at least one category are required")
            }
            TournamentError::TooManyCategories => {
                write!(f, "A player can register in at most {} categories", MAX_CATEGORIES_PER_PLAYER)
            }
            TournamentError::UnknownCategory(c) => {
                write!(f, "Category \"{}\" is not defined in tournament settings", c)
            }
            TournamentError::UnknownType(t) => {
                write!(f, "Tournament type \"{}\" is not defined in tournament settings", t)
            }
            TournamentError::DuplicateMobile(m) => {
                write!(f, "A player with mobile number {} already exists", m)
            }
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::NotReadyToPublish { reason } => {
                write!(f, "Cannot publish: {}", reason)
            }
        }
    }
}

fn default_min_group_size() -> usize {
    4
}

fn default_max_group_size() -> usize {
    6
}

/// Administrator-configured tournament settings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSettings {
    pub name: String,
    /// Event formats (e.g. "Singles", "Doubles").
    pub types: Vec<String>,
    /// Age/skill brackets players register under (e.g. "Open", "40+").
    pub categories: Vec<String>,
    #[serde(default = "default_min_group_size")]
    pub min_group_size: usize,
    #[serde(default = "default_max_group_size")]
    pub max_group_size: usize,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            name: "Untitled Tournament".to_string(),
            types: Vec::new(),
            categories: Vec::new(),
            min_group_size: default_min_group_size(),
            max_group_size: default_max_group_size(),
        }
    }
}

impl TournamentSettings {
    /// Validate settings as submitted by the admin form.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.name.trim().is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.types.is_empty() {
            return Err(TournamentError::NoTypes);
        }
        if self.categories.is_empty() {
            return Err(TournamentError::NoCategories);
        }
        if self.min_group_size == 0 || self.min_group_size > self.max_group_size {
            return Err(TournamentError::InvalidGroupSizes {
                min: self.min_group_size,
                max: self.max_group_size,
            });
        }
        Ok(())
    }
}

/// The whole persisted aggregate: settings, registrations, fixtures, publish flag.
/// Read and written wholesale; only admin operations mutate it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentData {
    pub settings: TournamentSettings,
    pub players: Vec<Player>,
    pub fixtures: Vec<CategoryFixture>,
    pub is_published: bool,
}

impl TournamentData {
    /// Replace settings after validation.
    pub fn update_settings(&mut self, settings: TournamentSettings) -> Result<(), TournamentError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    fn validate_player_fields(
        &self,
        name: &str,
        mobile: &str,
        categories: &[String],
    ) -> Result<(), TournamentError> {
        if name.trim().is_empty() || mobile.trim().is_empty() || categories.is_empty() {
            return Err(TournamentError::MissingPlayerFields);
        }
        if categories.len() > MAX_CATEGORIES_PER_PLAYER {
            return Err(TournamentError::TooManyCategories);
        }
        for c in categories {
            if !self.settings.categories.iter().any(|s| s == c) {
                return Err(TournamentError::UnknownCategory(c.clone()));
            }
        }
        Ok(())
    }

    /// Register a new player. The mobile number must be unique.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        mobile: impl Into<String>,
        categories: Vec<String>,
        fee_paid: bool,
    ) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let mobile = mobile.into();
        self.validate_player_fields(&name, &mobile, &categories)?;
        if self.players.iter().any(|p| p.mobile == mobile) {
            return Err(TournamentError::DuplicateMobile(mobile));
        }
        let player = Player::new(name.trim(), mobile.trim(), categories, fee_paid);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Edit an existing player. The mobile number must stay unique against everyone else.
    pub fn update_player(
        &mut self,
        player_id: PlayerId,
        name: impl Into<String>,
        mobile: impl Into<String>,
        categories: Vec<String>,
        fee_paid: bool,
    ) -> Result<(), TournamentError> {
        let name = name.into();
        let mobile = mobile.into();
        self.validate_player_fields(&name, &mobile, &categories)?;
        if self
            .players
            .iter()
            .any(|p| p.mobile == mobile && p.id != player_id)
        {
            return Err(TournamentError::DuplicateMobile(mobile));
        }
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        player.name = name.trim().to_string();
        player.mobile = mobile.trim().to_string();
        player.categories = categories;
        player.fee_paid = fee_paid;
        Ok(())
    }

    /// Delete a player and cascade through every fixture: drop them from groups,
    /// drop groups that fall below the minimum size, drop their matches, and drop
    /// fixtures left with no groups.
    pub fn delete_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);

        let min_group_size = self.settings.min_group_size;
        for fixture in &mut self.fixtures {
            for group in &mut fixture.groups {
                group.player_ids.retain(|id| *id != player_id);
            }
            fixture
                .groups
                .retain(|g| g.player_ids.len() >= min_group_size);
            fixture.matches.retain(|m| !m.involves(player_id));
        }
        self.fixtures.retain(|f| !f.groups.is_empty());
        Ok(())
    }

    /// Replace the fixture sharing this one's (category, type) key, leaving all
    /// other keys untouched.
    pub fn replace_fixture(&mut self, fixture: CategoryFixture) {
        self.fixtures
            .retain(|f| f.key() != fixture.key());
        self.fixtures.push(fixture);
    }

    /// Mark the tournament visible to spectators. Requires complete settings,
    /// at least one player, and at least one fixture.
    pub fn publish(&mut self) -> Result<(), TournamentError> {
        let reason = if self.settings.name.trim().is_empty() {
            Some("complete the tournament name in settings")
        } else if self.settings.types.is_empty() {
            Some("select tournament types in settings")
        } else if self.settings.categories.is_empty() {
            Some("select player categories in settings")
        } else if self.players.is_empty() {
            Some("add players")
        } else if self.fixtures.is_empty() {
            Some("generate or upload fixtures")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(TournamentError::NotReadyToPublish { reason });
        }
        self.is_published = true;
        Ok(())
    }

    /// Look up a player by id.
    pub fn get_player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Display name for a player id; falls back to a truncated id for players
    /// that were deleted after the fixture referenced them.
    pub fn player_name(&self, player_id: PlayerId) -> String {
        match self.get_player(player_id) {
            Some(p) => p.name.clone(),
            None => {
                let id = player_id.to_string();
                format!("Unknown Player ({})", &id[..4])
            }
        }
    }

    /// Mutable lookup of a match across all fixtures.
    pub fn get_match_mut(&mut self, match_id: MatchId) -> Option<&mut Match> {
        self.fixtures
            .iter_mut()
            .flat_map(|f| f.matches.iter_mut())
            .find(|m| m.id == match_id)
    }
}
