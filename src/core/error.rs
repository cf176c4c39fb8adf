//! Error taxonomy.
//!
//! Two families:
//!
//! - [`ConstructionError`]: malformed construction input. Fatal, since no
//!   meaningful game can exist.
//! - [`Rejection`]: caller misuse of a live game. Never fatal; the reducer
//!   returns the unchanged state together with the rejection.

use thiserror::Error;

use super::region::RegionId;
use super::state::Phase;
use super::team::TeamId;

/// Construction failed; no game state was produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("region list is empty")]
    NoRegions,
    #[error("at least {min} regions are required (got {got})")]
    TooFewRegions { min: usize, got: usize },
    #[error("region id {0} appears more than once")]
    DuplicateRegion(RegionId),
    #[error("at least one team is required")]
    NoTeams,
    #[error("at most {max} teams are supported (got {got})")]
    TooManyTeams { max: usize, got: usize },
    #[error("dice range {min}..={max} is invalid")]
    InvalidDiceRange { min: u8, max: u8 },
    #[error("streak bonus threshold must be at least 1")]
    InvalidStreakThreshold,
    #[error("challenge time limit must be at least one second")]
    InvalidTimeLimit,
    #[error("home-base mode needs a region per team ({teams} teams, {regions} regions)")]
    NotEnoughHomes { regions: usize, teams: usize },
    #[error("malformed configuration: {0}")]
    Config(String),
    #[error("snapshot is inconsistent")]
    InconsistentSnapshot,
}

impl From<serde_json::Error> for ConstructionError {
    fn from(err: serde_json::Error) -> Self {
        ConstructionError::Config(err.to_string())
    }
}

/// Why a home pick was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HomePickError {
    #[error("{region} is already {owner}'s home")]
    AlreadyClaimed { region: RegionId, owner: TeamId },
    #[error("unknown region {0}")]
    UnknownRegion(RegionId),
    #[error("{0} does not exist")]
    UnknownTeam(TeamId),
    #[error("it is {expected}'s turn to pick")]
    OutOfTurn { expected: TeamId },
    #[error("{0} already has a home")]
    AlreadyHoused(TeamId),
}

/// A recoverable, user-driven misuse. State is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("cannot {action} during {phase}")]
    InvalidPhaseTransition { action: &'static str, phase: Phase },
    #[error("cannot {action} while a challenge is pending")]
    ChallengePending { action: &'static str },
    #[error("invalid home pick: {0}")]
    InvalidHomePick(HomePickError),
    #[error("challenge resolution is stale")]
    StaleChallengeResolution,
    #[error("team count must be between 1 and {max} (got {got})")]
    InvalidTeamCount { max: usize, got: usize },
    #[error("team name must not be blank")]
    InvalidTeamName,
    #[error("{0} does not exist")]
    UnknownTeam(TeamId),
}

impl Rejection {
    /// Rejections the caller may silently drop (stale timer firings).
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Rejection::StaleChallengeResolution)
    }
}

impl From<HomePickError> for Rejection {
    fn from(err: HomePickError) -> Self {
        Rejection::InvalidHomePick(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConstructionError::TooManyTeams { max: 6, got: 9 };
        assert_eq!(err.to_string(), "at most 6 teams are supported (got 9)");

        let pick = HomePickError::AlreadyClaimed {
            region: RegionId::new("facets"),
            owner: TeamId::new(1),
        };
        assert_eq!(pick.to_string(), "facets is already team-2's home");

        let rejection = Rejection::InvalidPhaseTransition {
            action: "roll",
            phase: Phase::Setup,
        };
        assert_eq!(rejection.to_string(), "cannot roll during setup");
    }

    #[test]
    fn test_silent_rejections() {
        assert!(Rejection::StaleChallengeResolution.is_silent());
        assert!(!Rejection::InvalidTeamName.is_silent());
    }

    #[test]
    fn test_config_error_from_json() {
        let err: ConstructionError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, ConstructionError::Config(_)));
    }
}
