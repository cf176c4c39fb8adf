//! Win detection and standings.
//!
//! The only way the engine ends a game is full ownership: the instant a
//! team owns every region, the phase flips to `finished` inside the same
//! call that made the capture. Games stopped by an outside clock are the
//! caller's business; [`standings`] gives it the ranking to decide with.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameState, Phase, TeamId, MAX_TEAMS};

use super::engine::RulesContext;

/// Finish the game if the current team owns every region.
#[must_use]
pub fn check_win(ctx: &RulesContext<'_>, state: &GameState) -> GameState {
    let mut next = state.clone();
    let acting = next.current_team_id();
    apply_win_check(ctx, &mut next, acting);
    next
}

/// In-place win check for `acting`. Returns true if the game just ended.
pub(crate) fn apply_win_check(ctx: &RulesContext<'_>, state: &mut GameState, acting: TeamId) -> bool {
    let owned = state.team(acting).map_or(0, |t| t.owned_count());
    if owned < ctx.registry.len() {
        return false;
    }

    state.set_phase(Phase::Finished);
    state.set_winner(acting);
    log::info!("{acting} owns all {owned} regions and wins");
    true
}

/// Check if the game has ended.
#[must_use]
pub fn is_game_over(state: &GameState) -> bool {
    state.is_finished()
}

/// One row of the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team: TeamId,
    pub owned: usize,
    pub points: u32,
}

/// Teams ranked by regions owned, then points, then turn order.
#[must_use]
pub fn standings(state: &GameState) -> SmallVec<[Standing; MAX_TEAMS]> {
    let mut rows: SmallVec<[Standing; MAX_TEAMS]> = state
        .teams()
        .iter()
        .map(|t| Standing {
            team: t.id,
            owned: t.owned_count(),
            points: t.points,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.owned
            .cmp(&a.owned)
            .then(b.points.cmp(&a.points))
            .then(a.team.cmp(&b.team))
    });
    rows
}

/// The outright leader, or `None` when the top two tie on both regions and points.
#[must_use]
pub fn leader(state: &GameState) -> Option<TeamId> {
    let rows = standings(state);
    match rows.as_slice() {
        [first, second, ..] if first.owned == second.owned && first.points == second.points => None,
        [first, ..] => Some(first.team),
        [] => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameMode, RegionRegistry};

    fn setup() -> (RegionRegistry, GameConfig, GameState) {
        let registry = RegionRegistry::numbered("sec", 3).unwrap();
        let mut state = GameState::new(&registry, 3, GameMode::Classic).unwrap();
        state.set_phase(Phase::Playing);
        (registry, GameConfig::default(), state)
    }

    #[test]
    fn test_no_win_short_of_full_ownership() {
        let (registry, config, mut state) = setup();
        let ids: Vec<_> = registry.iter().map(|r| r.id.clone()).take(2).collect();
        for id in ids {
            state.current_team_mut().owned.insert(id);
        }

        let next = check_win(&RulesContext::new(&registry, &config), &state);
        assert_eq!(next.phase(), Phase::Playing);
        assert!(!is_game_over(&next));
    }

    #[test]
    fn test_full_ownership_wins() {
        let (registry, config, mut state) = setup();
        let ids: Vec<_> = registry.iter().map(|r| r.id.clone()).collect();
        for id in ids {
            state.current_team_mut().owned.insert(id);
        }

        let next = check_win(&RulesContext::new(&registry, &config), &state);
        assert!(is_game_over(&next));
        assert_eq!(next.winner(), Some(TeamId::new(0)));
    }

    #[test]
    fn test_standings_order() {
        let (registry, _, mut state) = setup();
        let ids: Vec<_> = registry.iter().map(|r| r.id.clone()).collect();

        state.team_mut(TeamId::new(2)).unwrap().owned.insert(ids[0].clone());
        state.team_mut(TeamId::new(1)).unwrap().points = 5;
        state.team_mut(TeamId::new(0)).unwrap().points = 2;

        let rows = standings(&state);
        let order: Vec<_> = rows.iter().map(|s| s.team).collect();
        assert_eq!(order, vec![TeamId::new(2), TeamId::new(1), TeamId::new(0)]);
        assert_eq!(leader(&state), Some(TeamId::new(2)));
    }

    #[test]
    fn test_leader_none_on_tie() {
        let (_, _, state) = setup();
        assert_eq!(leader(&state), None);
    }
}
