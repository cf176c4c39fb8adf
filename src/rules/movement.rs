//! Movement: roll, step around the board, decide what the landing means.

use crate::core::{
    DiceSource, GameState, Outcome, Phase, Rejection, RegionId, TeamId,
};

use super::engine::RulesContext;
use super::turn::apply_skip;

/// What the current team found on the region it landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    /// Nobody owns it: a claim challenge opens.
    Unowned,
    /// The mover already owns it: a free point, no challenge.
    Own,
    /// Another team owns it: a takeover challenge opens.
    Rival(TeamId),
}

/// Classify a region from `team`'s point of view.
#[must_use]
pub fn landing(state: &GameState, team: TeamId, region: &RegionId) -> Landing {
    match state.owner_of(region) {
        None => Landing::Unowned,
        Some(owner) if owner == team => Landing::Own,
        Some(owner) => Landing::Rival(owner),
    }
}

/// Roll for the current team and move its token.
///
/// Checks a pending skip first; a skipped turn draws no dice. Otherwise the
/// token advances `roll` regions (wrapping) and exactly one of the landing
/// paths runs.
///
/// # Errors
///
/// Rejects outside `playing` and while a challenge is pending.
pub fn roll_and_move<D: DiceSource + ?Sized>(
    ctx: &RulesContext<'_>,
    state: &GameState,
    dice: &mut D,
) -> Result<GameState, Rejection> {
    if state.phase() != Phase::Playing {
        return Err(Rejection::InvalidPhaseTransition {
            action: "roll",
            phase: state.phase(),
        });
    }
    if state.pending().is_some() {
        return Err(Rejection::ChallengePending { action: "roll" });
    }

    let mut next = state.clone();
    if apply_skip(&mut next) {
        return Ok(next);
    }

    let roll = dice.roll(ctx.config.dice);
    let mover = next.current_team_id();
    let from = ctx
        .registry
        .index_of(&next.current_team().position)
        .unwrap_or(0);
    let region = ctx.registry.step(from, usize::from(roll));
    let region_id = region.id.clone();
    let region_name = region.name.clone();

    next.set_last_roll(roll);
    next.current_team_mut().position = region_id.clone();
    let team_name = next.current_team().name.clone();

    log::trace!("{team_name} rolled {roll}: index {from} -> {region_id}");

    match landing(&next, mover, &region_id) {
        Landing::Unowned => {
            let id = next.open_challenge(region_id, None);
            log::debug!("{id} opened: {team_name} claims {region_name}");
            next.set_outcome(Outcome::ChallengeOpened {
                team: team_name,
                region: region_name,
                roll,
                defender: None,
            });
        }
        Landing::Own => {
            let points = ctx.config.scoring.self_landing;
            next.current_team_mut().points += points;
            next.set_outcome(Outcome::SelfLanding {
                team: team_name,
                region: region_name,
                roll,
                points,
            });
            next.rotate_turn();
        }
        Landing::Rival(owner) => {
            let defender = next
                .team(owner)
                .map_or_else(|| owner.to_string(), |t| t.name.clone());
            let id = next.open_challenge(region_id, Some(owner));
            log::debug!("{id} opened: {team_name} attacks {defender} at {region_name}");
            next.set_outcome(Outcome::ChallengeOpened {
                team: team_name,
                region: region_name,
                roll,
                defender: Some(defender),
            });
        }
    }

    Ok(next)
}
