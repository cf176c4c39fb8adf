//! Game state: the canonical immutable snapshot.
//!
//! ## GameState
//!
//! Everything the rules and the renderer need:
//! - Phase, mode, turn pointer and turn number
//! - Teams with their score state and owned regions
//! - Pending challenge (at most one)
//! - Last outcome, last roll, winner
//! - Action history
//!
//! Uses `im` persistent data structures, so cloning a snapshot is O(1).
//! Only the rules in this crate mutate a state, and they always do so on a
//! fresh clone: a transition is `&GameState -> GameState`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::{GameConfig, GameMode};
use super::error::ConstructionError;
use super::region::{RegionId, RegionRegistry};
use super::team::{Team, TeamId};

/// Lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Roster is editable; nothing has been played.
    #[default]
    Setup,
    /// Home-base mode only: teams are choosing homes.
    PickHomes,
    /// Teams are taking turns.
    Playing,
    /// A team owns every region. Terminal until reset.
    Finished,
}

impl Phase {
    /// Position in the forward-only lifecycle.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Phase::Setup => 0,
            Phase::PickHomes => 1,
            Phase::Playing => 2,
            Phase::Finished => 3,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Setup => "setup",
            Phase::PickHomes => "pick-homes",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        })
    }
}

/// Identity of one pending challenge. Never reused within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChallengeId(pub u64);

impl ChallengeId {
    /// Create a new challenge ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Challenge({})", self.0)
    }
}

/// A challenge waiting for an answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChallenge {
    /// Identity, used to discard stale resolutions.
    pub id: ChallengeId,
    /// Region at stake.
    pub region: RegionId,
    /// Current owner if this is a takeover; `None` for an unowned claim.
    pub defender: Option<TeamId>,
}

impl PendingChallenge {
    /// Check if this challenge is a takeover attempt.
    #[must_use]
    pub fn is_takeover(&self) -> bool {
        self.defender.is_some()
    }
}

/// Points awarded for one capture, itemized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub base: u32,
    pub takeover: u32,
    pub streak: u32,
}

impl Award {
    /// Sum of all parts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.base + self.takeover + self.streak
    }
}

impl std::fmt::Display for Award {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{} base", self.base)?;
        if self.takeover > 0 {
            write!(f, ", +{} takeover", self.takeover)?;
        }
        if self.streak > 0 {
            write!(f, ", +{} streak", self.streak)?;
        }
        Ok(())
    }
}

/// What the last accepted action did, for the renderer's status line.
///
/// Names are captured at the time of the action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Outcome {
    /// The team forfeited its turn to a pending skip.
    Skipped { team: String },
    /// The roll opened a challenge.
    ChallengeOpened {
        team: String,
        region: String,
        roll: u8,
        defender: Option<String>,
    },
    /// The team landed on a region it already owns.
    SelfLanding {
        team: String,
        region: String,
        roll: u8,
        points: u32,
    },
    /// A challenge succeeded.
    Captured {
        team: String,
        region: String,
        from: Option<String>,
        award: Award,
    },
    /// A challenge failed.
    Missed {
        team: String,
        region: String,
        penalty: u32,
        takeover: bool,
    },
    /// A resolution arrived with no challenge open; the turn passed.
    Passed { team: String },
    /// A team claimed its home.
    HomePicked { team: String, region: String },
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Skipped { team } => write!(f, "{team} skips this turn."),
            Outcome::ChallengeOpened {
                team,
                region,
                roll,
                defender: None,
            } => write!(f, "{team} rolled {roll} and landed on {region}. Answer to claim it!"),
            Outcome::ChallengeOpened {
                team,
                region,
                roll,
                defender: Some(defender),
            } => write!(
                f,
                "{team} rolled {roll} and landed on {region}, held by {defender}. Answer to take it over!"
            ),
            Outcome::SelfLanding {
                team,
                region,
                roll,
                points,
            } => write!(f, "{team} rolled {roll} and landed on its own {region}. +{points} point."),
            Outcome::Captured {
                team,
                region,
                from: None,
                award,
            } => write!(f, "{team} claimed {region}! ({award})"),
            Outcome::Captured {
                team,
                region,
                from: Some(from),
                award,
            } => write!(f, "{team} stole {region} from {from}! ({award})"),
            Outcome::Missed {
                team,
                region,
                penalty,
                takeover,
            } => {
                write!(f, "{team} missed {region}. -{penalty} point")?;
                if *takeover {
                    f.write_str(" and skip next turn (failed takeover)")?;
                }
                f.write_str(".")
            }
            Outcome::Passed { team } => write!(f, "No challenge was open; {team} passes."),
            Outcome::HomePicked { team, region } => write!(f, "{team} made {region} its home."),
        }
    }
}

/// Complete game snapshot.
///
/// Read access is public; mutation is restricted to the rules.
/// Deserialized snapshots are checked with [`GameState::is_consistent`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateSnapshot")]
pub struct GameState {
    mode: GameMode,
    phase: Phase,
    teams: Vector<Team>,
    current: usize,
    pending: Option<PendingChallenge>,
    last_outcome: Option<Outcome>,
    winner: Option<TeamId>,
    last_roll: Option<u8>,
    turn_number: u32,
    next_challenge: u64,
    history: Vector<ActionRecord>,
}

/// Wire form of [`GameState`], validated before it becomes one.
#[derive(Deserialize)]
struct StateSnapshot {
    mode: GameMode,
    phase: Phase,
    teams: Vector<Team>,
    current: usize,
    pending: Option<PendingChallenge>,
    last_outcome: Option<Outcome>,
    winner: Option<TeamId>,
    last_roll: Option<u8>,
    turn_number: u32,
    next_challenge: u64,
    history: Vector<ActionRecord>,
}

impl TryFrom<StateSnapshot> for GameState {
    type Error = ConstructionError;

    fn try_from(snapshot: StateSnapshot) -> Result<Self, Self::Error> {
        let state = Self {
            mode: snapshot.mode,
            phase: snapshot.phase,
            teams: snapshot.teams,
            current: snapshot.current,
            pending: snapshot.pending,
            last_outcome: snapshot.last_outcome,
            winner: snapshot.winner,
            last_roll: snapshot.last_roll,
            turn_number: snapshot.turn_number,
            next_challenge: snapshot.next_challenge,
            history: snapshot.history,
        };
        let winner_known = state.winner.map_or(true, |id| id.index() < state.teams.len());
        if state.is_consistent() && winner_known {
            Ok(state)
        } else {
            Err(ConstructionError::InconsistentSnapshot)
        }
    }
}

impl GameState {
    /// Build a fresh game in `setup` with `team_count` teams on the first region.
    ///
    /// # Errors
    ///
    /// Fails on an empty board, zero teams, more teams than colors, or (in
    /// home-base mode) more teams than regions to make homes of.
    pub fn new(
        registry: &RegionRegistry,
        team_count: usize,
        mode: GameMode,
    ) -> Result<Self, ConstructionError> {
        if registry.is_empty() {
            return Err(ConstructionError::NoRegions);
        }
        GameConfig::validate_team_count(team_count)?;
        if mode == GameMode::HomeBase && team_count > registry.len() {
            return Err(ConstructionError::NotEnoughHomes {
                regions: registry.len(),
                teams: team_count,
            });
        }

        let start = registry.first().id.clone();
        let teams = TeamId::all(team_count)
            .map(|id| Team::new(id, start.clone()))
            .collect();

        Ok(Self {
            mode,
            phase: Phase::Setup,
            teams,
            current: 0,
            pending: None,
            last_outcome: None,
            winner: None,
            last_roll: None,
            turn_number: 1,
            next_challenge: 1,
            history: Vector::new(),
        })
    }

    /// Build from a full configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate.
    pub fn from_config(registry: &RegionRegistry, config: &GameConfig) -> Result<Self, ConstructionError> {
        config.validate()?;
        Self::new(registry, config.team_count, config.mode)
    }

    // === Progression ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Play mode.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Turn number (starts at 1).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Last roll of the current turn, cleared when the turn passes.
    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    /// The open challenge, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingChallenge> {
        self.pending.as_ref()
    }

    /// What the last accepted action did.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Winning team once the game is finished.
    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Accepted commands, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Teams ===

    /// All teams in turn order.
    #[must_use]
    pub fn teams(&self) -> &Vector<Team> {
        &self.teams
    }

    /// Number of teams.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Get a team by ID.
    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id.index())
    }

    /// Index of the team whose turn it is.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// ID of the team whose turn it is.
    #[must_use]
    pub fn current_team_id(&self) -> TeamId {
        self.teams[self.current].id
    }

    /// The team whose turn it is.
    #[must_use]
    pub fn current_team(&self) -> &Team {
        &self.teams[self.current]
    }

    // === Ownership ===

    /// Team that owns a region.
    #[must_use]
    pub fn owner_of(&self, region: &RegionId) -> Option<TeamId> {
        self.teams.iter().find(|t| t.owns(region)).map(|t| t.id)
    }

    /// Every owned region with its owner.
    pub fn owners(&self) -> impl Iterator<Item = (&RegionId, TeamId)> {
        self.teams
            .iter()
            .flat_map(|t| t.owned.iter().map(move |r| (r, t.id)))
    }

    /// Team whose home is `region`.
    #[must_use]
    pub fn home_owner(&self, region: &RegionId) -> Option<TeamId> {
        self.teams
            .iter()
            .find(|t| t.home.as_ref() == Some(region))
            .map(|t| t.id)
    }

    /// Check if a region is anyone's home.
    #[must_use]
    pub fn is_home(&self, region: &RegionId) -> bool {
        self.home_owner(region).is_some()
    }

    /// Teams whose tokens stand on `region`.
    pub fn teams_at<'a>(&'a self, region: &'a RegionId) -> impl Iterator<Item = &'a Team> + 'a {
        self.teams.iter().filter(move |t| &t.position == region)
    }

    /// Regions owned across all teams.
    #[must_use]
    pub fn total_owned(&self) -> usize {
        self.teams.iter().map(Team::owned_count).sum()
    }

    /// Check structural invariants: turn pointer in range, at most one
    /// owner per region.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.current >= self.teams.len() {
            return false;
        }
        let mut seen = im::OrdSet::new();
        for (region, _) in self.owners() {
            if seen.insert(region.clone()).is_some() {
                return false;
            }
        }
        true
    }

    // === Mutation (rules only) ===

    pub(crate) fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(id.index())
    }

    pub(crate) fn current_team_mut(&mut self) -> &mut Team {
        &mut self.teams[self.current]
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.last_outcome = Some(outcome);
    }

    pub(crate) fn set_winner(&mut self, team: TeamId) {
        self.winner = Some(team);
    }

    pub(crate) fn set_last_roll(&mut self, roll: u8) {
        self.last_roll = Some(roll);
    }

    /// Move the turn pointer to the next team and clear per-turn state.
    pub(crate) fn rotate_turn(&mut self) {
        self.current = (self.current + 1) % self.teams.len();
        self.last_roll = None;
        self.turn_number += 1;
    }

    /// Put the turn pointer back on the first team.
    pub(crate) fn rewind_turn(&mut self) {
        self.current = 0;
        self.last_roll = None;
    }

    /// Open a challenge and return its identity.
    pub(crate) fn open_challenge(&mut self, region: RegionId, defender: Option<TeamId>) -> ChallengeId {
        let id = ChallengeId(self.next_challenge);
        self.next_challenge += 1;
        self.pending = Some(PendingChallenge {
            id,
            region,
            defender,
        });
        id
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingChallenge> {
        self.pending.take()
    }

    pub(crate) fn record(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    /// Continue numbering challenges where `prior` left off, so a timer
    /// armed before a rebuild can never match a challenge opened after it.
    /// With `keep_history` the prior command log is carried too.
    pub(crate) fn carry_over(&mut self, prior: &GameState, keep_history: bool) {
        self.next_challenge = self.next_challenge.max(prior.next_challenge);
        if keep_history {
            self.history = prior.history.clone();
        }
    }
}
