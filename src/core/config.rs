//! Game configuration.
//!
//! Games configure the engine at startup by providing a `GameConfig`:
//! - Team count and play mode (classic or home-base)
//! - Dice range
//! - Scoring amounts
//! - Optional per-challenge time limit
//! - RNG seed
//!
//! Configuration is plain serde data, so it can come from JSON.

use serde::{Deserialize, Serialize};

use super::error::ConstructionError;
use super::rng::DiceRange;
use super::team::MAX_TEAMS;

/// Play mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Teams start on the first region with nothing owned.
    #[default]
    Classic,
    /// Teams pick a home region before play starts.
    HomeBase,
}

/// Point amounts awarded and deducted by the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Awarded for any successful capture.
    pub base: u32,
    /// Extra for capturing from another team.
    pub takeover_bonus: u32,
    /// Extra once the streak reaches `streak_threshold`.
    pub streak_bonus: u32,
    /// Streak length that earns `streak_bonus`.
    pub streak_threshold: u32,
    /// Awarded for landing on a region you already own.
    pub self_landing: u32,
    /// Deducted for a failed attempt (floored at zero).
    pub miss_penalty: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base: 1,
            takeover_bonus: 1,
            streak_bonus: 1,
            streak_threshold: 3,
            self_landing: 1,
            miss_penalty: 1,
        }
    }
}

impl ScoringRules {
    /// Points for a successful capture given the new streak.
    #[must_use]
    pub fn capture_points(&self, takeover: bool, new_streak: u32) -> u32 {
        let mut points = self.base;
        if takeover {
            points += self.takeover_bonus;
        }
        if new_streak >= self.streak_threshold {
            points += self.streak_bonus;
        }
        points
    }

    /// Whether a streak has reached the bonus threshold.
    #[must_use]
    pub fn is_hot(&self, streak: u32) -> bool {
        streak >= self.streak_threshold
    }
}

/// Full engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of teams (1 to 6).
    pub team_count: usize,

    /// Classic or home-base.
    pub mode: GameMode,

    /// Movement roll range.
    pub dice: DiceRange,

    /// Point amounts.
    pub scoring: ScoringRules,

    /// Seconds a team has to answer before the challenge auto-fails.
    /// `None` disables the countdown.
    pub challenge_seconds: Option<u32>,

    /// Seed for the default dice.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            team_count: 4,
            mode: GameMode::Classic,
            dice: DiceRange::default(),
            scoring: ScoringRules::default(),
            challenge_seconds: None,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or on a configuration `validate` rejects.
    pub fn from_json(json: &str) -> Result<Self, ConstructionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the team count.
    #[must_use]
    pub fn with_teams(mut self, team_count: usize) -> Self {
        self.team_count = team_count;
        self
    }

    /// Set the play mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the dice range.
    #[must_use]
    pub fn with_dice(mut self, dice: DiceRange) -> Self {
        self.dice = dice;
        self
    }

    /// Set the scoring amounts.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    /// Enable the answer countdown.
    #[must_use]
    pub fn with_challenge_seconds(mut self, seconds: u32) -> Self {
        self.challenge_seconds = Some(seconds);
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the team count alone.
    ///
    /// # Errors
    ///
    /// Zero teams, or more teams than there are distinct colors.
    pub fn validate_team_count(team_count: usize) -> Result<(), ConstructionError> {
        if team_count == 0 {
            return Err(ConstructionError::NoTeams);
        }
        if team_count > MAX_TEAMS {
            return Err(ConstructionError::TooManyTeams {
                max: MAX_TEAMS,
                got: team_count,
            });
        }
        Ok(())
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        Self::validate_team_count(self.team_count)?;
        if !self.dice.is_valid() {
            return Err(ConstructionError::InvalidDiceRange {
                min: self.dice.min,
                max: self.dice.max,
            });
        }
        if self.scoring.streak_threshold == 0 {
            return Err(ConstructionError::InvalidStreakThreshold);
        }
        if self.challenge_seconds == Some(0) {
            return Err(ConstructionError::InvalidTimeLimit);
        }
        Ok(())
    }
}
