//! Challenge arbitration: turn a right/wrong answer into ownership and score.
//!
//! Skip penalties are asymmetric. A failed takeover costs the attacker a
//! turn; a successful takeover costs the defender one.

use crate::core::{Award, ChallengeId, GameState, Outcome, Phase, Rejection, RegionId, TeamId};

use super::engine::RulesContext;
use super::win::apply_win_check;

/// Resolve the pending challenge.
///
/// `challenge` tags the resolution with the challenge it was meant for;
/// a tagged resolution that no longer matches the open challenge (a timer
/// firing after the user answered, say) is rejected as stale and changes
/// nothing. An untagged resolution with no challenge open simply passes the
/// turn.
///
/// On success the win check runs before the turn advances; a winning
/// capture leaves the turn pointer on the winner.
///
/// # Errors
///
/// [`Rejection::StaleChallengeResolution`] for a mismatched tag,
/// [`Rejection::InvalidPhaseTransition`] for an untagged resolution
/// outside `playing`.
pub fn resolve_challenge(
    ctx: &RulesContext<'_>,
    state: &GameState,
    challenge: Option<ChallengeId>,
    success: bool,
) -> Result<GameState, Rejection> {
    let pending = match (state.pending(), challenge) {
        (Some(p), Some(id)) if p.id != id => return Err(Rejection::StaleChallengeResolution),
        (None, Some(_)) => return Err(Rejection::StaleChallengeResolution),
        (_, None) if state.phase() != Phase::Playing => {
            return Err(Rejection::InvalidPhaseTransition {
                action: "resolve challenge",
                phase: state.phase(),
            })
        }
        (pending, _) => pending.cloned(),
    };

    let mut next = state.clone();

    let Some(pending) = pending else {
        let team = next.current_team().name.clone();
        next.set_outcome(Outcome::Passed { team });
        next.rotate_turn();
        return Ok(next);
    };
    next.take_pending();

    let scoring = &ctx.config.scoring;
    let region_name = ctx.registry.name_of(&pending.region);
    let mover = next.current_team_id();

    if !success {
        let team = next.current_team_mut();
        team.penalize(scoring.miss_penalty);
        team.streak = 0;
        if pending.is_takeover() {
            team.skip += 1;
        }
        log::debug!("{} failed: {} missed {}", pending.id, team.name, region_name);

        let outcome = Outcome::Missed {
            team: team.name.clone(),
            region: region_name,
            penalty: scoring.miss_penalty,
            takeover: pending.is_takeover(),
        };
        next.set_outcome(outcome);
        next.rotate_turn();
        return Ok(next);
    }

    let from = match pending.defender {
        Some(defender) => Some(evict(&mut next, defender, &pending.region)),
        None => None,
    };

    let team = next.current_team_mut();
    team.owned.insert(pending.region.clone());
    team.streak += 1;
    let award = Award {
        base: scoring.base,
        takeover: if from.is_some() { scoring.takeover_bonus } else { 0 },
        streak: if scoring.is_hot(team.streak) { scoring.streak_bonus } else { 0 },
    };
    debug_assert_eq!(award.total(), scoring.capture_points(from.is_some(), team.streak));
    team.points += award.total();
    log::debug!(
        "{} succeeded: {} took {} (+{}, streak {})",
        pending.id,
        team.name,
        region_name,
        award.total(),
        team.streak
    );

    let outcome = Outcome::Captured {
        team: team.name.clone(),
        region: region_name,
        from,
        award,
    };
    next.set_outcome(outcome);

    if !apply_win_check(ctx, &mut next, mover) {
        next.rotate_turn();
    }
    Ok(next)
}

/// Take `region` away from `defender`, who also owes a skip. Returns the
/// defender's name.
fn evict(state: &mut GameState, defender: TeamId, region: &RegionId) -> String {
    match state.team_mut(defender) {
        Some(team) => {
            team.owned.remove(region);
            team.skip += 1;
            team.name.clone()
        }
        None => defender.to_string(),
    }
}
