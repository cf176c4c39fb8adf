//! Core engine types: regions, teams, state, commands, dice, configuration.
//!
//! This module holds the data the rules operate on. It contains no rules
//! itself beyond construction and bookkeeping.

pub mod action;
pub mod config;
pub mod error;
pub mod region;
pub mod rng;
pub mod state;
pub mod team;

pub use action::{ActionRecord, Command};
pub use config::{GameConfig, GameMode, ScoringRules};
pub use error::{ConstructionError, HomePickError, Rejection};
pub use region::{Region, RegionId, RegionRegistry, MIN_REGIONS};
pub use rng::{DiceRange, DiceSource, GameRng, GameRngState, ScriptedDice};
pub use state::{Award, ChallengeId, GameState, Outcome, PendingChallenge, Phase};
pub use team::{Team, TeamId, MAX_TEAMS, TEAM_COLORS};
