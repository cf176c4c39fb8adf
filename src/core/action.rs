//! Commands: the closed set of things a caller can ask the engine to do.
//!
//! Every user-initiated action (and every timer expiry) is expressed as a
//! [`Command`] and fed to one reducer. Accepted commands are appended to the
//! state's history as [`ActionRecord`]s, which makes any game replayable
//! from its seed and command list.

use serde::{Deserialize, Serialize};

use super::region::RegionId;
use super::state::ChallengeId;
use super::team::TeamId;

/// A request to change the game state.
///
/// ## Example
///
/// ```
/// use region_conquest::core::{ChallengeId, Command};
///
/// let roll = Command::RollDie;
/// let answer = Command::answer(true);
/// let expired = Command::timeout(ChallengeId::new(3));
///
/// assert_eq!(roll.name(), "roll");
/// assert!(answer.is_resolution());
/// assert_eq!(expired, Command::answer_for(ChallengeId::new(3), false));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    /// Leave setup and begin play (or home picking).
    Start,

    /// Rebuild the roster with a new number of teams (setup only).
    SetTeamCount { count: usize },

    /// Rename a team (setup only).
    RenameTeam { team: TeamId, name: String },

    /// Claim a home region (home-base mode, pick-homes phase).
    PickHome { team: TeamId, region: RegionId },

    /// Roll and move the current team.
    RollDie,

    /// Resolve the pending challenge.
    ///
    /// With `challenge: Some(id)` the resolution only applies if `id` is
    /// still the active challenge.
    ResolveChallenge {
        challenge: Option<ChallengeId>,
        success: bool,
    },

    /// Discard everything and return to setup.
    Reset,
}

impl Command {
    /// Resolve whatever challenge is active.
    #[must_use]
    pub fn answer(success: bool) -> Self {
        Command::ResolveChallenge {
            challenge: None,
            success,
        }
    }

    /// Resolve a specific challenge; ignored if it is no longer active.
    #[must_use]
    pub fn answer_for(challenge: ChallengeId, success: bool) -> Self {
        Command::ResolveChallenge {
            challenge: Some(challenge),
            success,
        }
    }

    /// A countdown expired. Equivalent to a failed, tagged answer.
    #[must_use]
    pub fn timeout(challenge: ChallengeId) -> Self {
        Self::answer_for(challenge, false)
    }

    /// Short verb for logs and rejection messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::SetTeamCount { .. } => "set team count",
            Command::RenameTeam { .. } => "rename team",
            Command::PickHome { .. } => "pick home",
            Command::RollDie => "roll",
            Command::ResolveChallenge { .. } => "resolve challenge",
            Command::Reset => "reset",
        }
    }

    /// Check if this command resolves a challenge.
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        matches!(self, Command::ResolveChallenge { .. })
    }
}

/// An accepted command with the context it was applied in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The team whose turn it was.
    pub team: TeamId,

    /// The command applied.
    pub command: Command,

    /// Turn number when the command was applied.
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(team: TeamId, command: Command, turn: u32) -> Self {
        Self {
            team,
            command,
            turn,
        }
    }
}
