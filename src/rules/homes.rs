//! Home-base mode: teams claim one home region each before play starts.

use crate::core::{
    GameState, HomePickError, Outcome, Phase, Rejection, RegionId, TeamId,
};

use super::engine::RulesContext;

/// Claim `region` as `team`'s home.
///
/// Picks go in turn order. The home joins the team's owned set and the
/// team's token moves onto it. After the last pick the phase becomes
/// `playing` with the turn back on the first team.
///
/// # Errors
///
/// Outside `pick-homes` the pick is an invalid phase transition. Otherwise
/// the region must exist and not already be a home, and the team must
/// exist, be the one whose turn it is, and not have a home yet.
pub fn pick_home(
    ctx: &RulesContext<'_>,
    state: &GameState,
    team: TeamId,
    region: &RegionId,
) -> Result<GameState, Rejection> {
    if state.phase() != Phase::PickHomes {
        return Err(Rejection::InvalidPhaseTransition {
            action: "pick home",
            phase: state.phase(),
        });
    }
    validate_pick(ctx, state, team, region)?;

    let mut next = state.clone();
    let region_name = ctx.registry.name_of(region);
    let Some(picker) = next.team_mut(team) else {
        return Err(HomePickError::UnknownTeam(team).into());
    };
    picker.home = Some(region.clone());
    picker.owned.insert(region.clone());
    picker.position = region.clone();
    let team_name = picker.name.clone();
    log::debug!("{team_name} picked {region_name} as home");

    next.set_outcome(Outcome::HomePicked {
        team: team_name,
        region: region_name,
    });

    if next.teams().iter().all(|t| t.home.is_some()) {
        next.set_phase(Phase::Playing);
        next.rewind_turn();
        log::info!("all homes picked; play begins");
    } else {
        next.rotate_turn();
    }
    Ok(next)
}

/// Regions still free to pick, in board order.
pub fn available_homes<'a>(
    ctx: &'a RulesContext<'a>,
    state: &'a GameState,
) -> impl Iterator<Item = &'a RegionId> + 'a {
    ctx.registry
        .iter()
        .map(|r| &r.id)
        .filter(move |id| !state.is_home(id))
}

fn validate_pick(
    ctx: &RulesContext<'_>,
    state: &GameState,
    team: TeamId,
    region: &RegionId,
) -> Result<(), HomePickError> {
    if !ctx.registry.contains(region) {
        return Err(HomePickError::UnknownRegion(region.clone()));
    }
    if let Some(owner) = state.home_owner(region) {
        return Err(HomePickError::AlreadyClaimed {
            region: region.clone(),
            owner,
        });
    }
    let Some(picker) = state.team(team) else {
        return Err(HomePickError::UnknownTeam(team));
    };
    if picker.home.is_some() {
        return Err(HomePickError::AlreadyHoused(team));
    }
    let expected = state.current_team_id();
    if team != expected {
        return Err(HomePickError::OutOfTurn { expected });
    }
    Ok(())
}
