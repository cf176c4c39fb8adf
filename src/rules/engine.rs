//! The reducer: one entry point for every command.
//!
//! `reduce` takes a snapshot and a [`Command`] and returns a [`Transition`].
//! It never panics on user input and never mutates its argument: a rejected
//! command hands back the input snapshot together with the reason.
//!
//! ## Dispatch
//!
//! | Command | Handler |
//! |---|---|
//! | `Start`, `SetTeamCount`, `RenameTeam`, `Reset` | setup handling here |
//! | `PickHome` | [`super::homes::pick_home`] |
//! | `RollDie` | [`super::movement::roll_and_move`] |
//! | `ResolveChallenge` | [`super::challenge::resolve_challenge`] |

use smallvec::SmallVec;

use crate::core::{
    ActionRecord, Command, ConstructionError, DiceSource, GameConfig, GameMode, GameState, Phase, Rejection,
    RegionRegistry, TeamId, MAX_TEAMS,
};

use super::challenge::resolve_challenge;
use super::homes::{available_homes, pick_home};
use super::movement::roll_and_move;

/// Read-only collaborators every rule needs: the board and the configuration.
#[derive(Clone, Copy, Debug)]
pub struct RulesContext<'a> {
    pub registry: &'a RegionRegistry,
    pub config: &'a GameConfig,
}

impl<'a> RulesContext<'a> {
    /// Create a new rules context.
    #[must_use]
    pub fn new(registry: &'a RegionRegistry, config: &'a GameConfig) -> Self {
        Self { registry, config }
    }
}

/// Result of reducing one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The state after the command (the input state if it was rejected).
    pub state: GameState,
    /// Why the command was rejected, if it was.
    pub rejection: Option<Rejection>,
}

impl Transition {
    /// An accepted command.
    #[must_use]
    pub fn accepted(state: GameState) -> Self {
        Self {
            state,
            rejection: None,
        }
    }

    /// A rejected command; `state` is the unchanged input.
    #[must_use]
    pub fn rejected(state: GameState, rejection: Rejection) -> Self {
        Self {
            state,
            rejection: Some(rejection),
        }
    }

    /// Check if the command was applied.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }

    /// Split into a `Result`, discarding the state on rejection.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason if the command was not applied.
    pub fn into_result(self) -> Result<GameState, Rejection> {
        match self.rejection {
            None => Ok(self.state),
            Some(rejection) => Err(rejection),
        }
    }
}

/// Apply `command` to `state`.
///
/// Accepted commands are appended to the history, except `Reset`, which
/// starts a fresh log. Dice are drawn only by an accepted roll that is not
/// a forfeited turn.
pub fn reduce<D: DiceSource + ?Sized>(
    ctx: &RulesContext<'_>,
    state: &GameState,
    command: &Command,
    dice: &mut D,
) -> Transition {
    let actor = state.current_team_id();
    let turn = state.turn_number();

    let result = match command {
        Command::Start => start(state),
        Command::SetTeamCount { count } => set_team_count(ctx, state, *count),
        Command::RenameTeam { team, name } => rename_team(state, *team, name),
        Command::PickHome { team, region } => pick_home(ctx, state, *team, region),
        Command::RollDie => roll_and_move(ctx, state, dice),
        Command::ResolveChallenge { challenge, success } => {
            resolve_challenge(ctx, state, *challenge, *success)
        }
        Command::Reset => reset(ctx, state),
    };

    match result {
        Ok(mut next) => {
            if !matches!(command, Command::Reset) {
                next.record(ActionRecord::new(actor, command.clone(), turn));
            }
            debug_assert!(next.is_consistent());
            match next.last_outcome() {
                Some(outcome) if next.last_outcome() != state.last_outcome() => {
                    log::debug!("{actor} {}: {outcome}", command.name());
                }
                _ => log::debug!("{actor} {}", command.name()),
            }
            Transition::accepted(next)
        }
        Err(rejection) => {
            log::debug!("rejected {} from {actor}: {rejection}", command.name());
            Transition::rejected(state.clone(), rejection)
        }
    }
}

/// Commands that would be accepted right now.
///
/// Roster edits (`SetTeamCount`, `RenameTeam`) take free-form arguments and
/// are not listed. `Reset` is always legal.
#[must_use]
pub fn legal_commands(ctx: &RulesContext<'_>, state: &GameState) -> SmallVec<[Command; 4]> {
    let mut commands = SmallVec::new();
    match state.phase() {
        Phase::Setup => commands.push(Command::Start),
        Phase::PickHomes => {
            let team = state.current_team_id();
            commands.extend(available_homes(ctx, state).map(|region| Command::PickHome {
                team,
                region: region.clone(),
            }));
        }
        Phase::Playing => match state.pending() {
            Some(pending) => {
                commands.push(Command::answer_for(pending.id, true));
                commands.push(Command::answer_for(pending.id, false));
            }
            None => commands.push(Command::RollDie),
        },
        Phase::Finished => {}
    }
    commands.push(Command::Reset);
    commands
}

// === Setup ===

fn start(state: &GameState) -> Result<GameState, Rejection> {
    require_setup(state, "start")?;

    let mut next = state.clone();
    let phase = match state.mode() {
        GameMode::Classic => Phase::Playing,
        GameMode::HomeBase => Phase::PickHomes,
    };
    next.set_phase(phase);
    log::info!("game started with {} teams ({phase})", next.team_count());
    Ok(next)
}

fn set_team_count(
    ctx: &RulesContext<'_>,
    state: &GameState,
    count: usize,
) -> Result<GameState, Rejection> {
    require_setup(state, "set team count")?;
    let max = match state.mode() {
        GameMode::Classic => MAX_TEAMS,
        GameMode::HomeBase => MAX_TEAMS.min(ctx.registry.len()),
    };
    let invalid = |_: ConstructionError| Rejection::InvalidTeamCount { max, got: count };
    GameConfig::validate_team_count(count).map_err(invalid)?;

    let mut next = GameState::new(ctx.registry, count, state.mode()).map_err(invalid)?;
    next.carry_over(state, true);
    Ok(next)
}

fn rename_team(state: &GameState, team: TeamId, name: &str) -> Result<GameState, Rejection> {
    require_setup(state, "rename team")?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Rejection::InvalidTeamName);
    }

    let mut next = state.clone();
    let target = next.team_mut(team).ok_or(Rejection::UnknownTeam(team))?;
    target.name = name.to_string();
    Ok(next)
}

fn reset(ctx: &RulesContext<'_>, state: &GameState) -> Result<GameState, Rejection> {
    let count = state.team_count();
    let mut next = GameState::new(ctx.registry, count, state.mode()).map_err(|_| {
        Rejection::InvalidTeamCount {
            max: MAX_TEAMS,
            got: count,
        }
    })?;
    next.carry_over(state, false);
    log::info!("game reset ({count} teams)");
    Ok(next)
}

fn require_setup(state: &GameState, action: &'static str) -> Result<(), Rejection> {
    if state.phase() == Phase::Setup {
        Ok(())
    } else {
        Err(Rejection::InvalidPhaseTransition {
            action,
            phase: state.phase(),
        })
    }
}
