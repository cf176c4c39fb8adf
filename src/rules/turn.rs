//! Turn rotation and forced skips.

use crate::core::{GameState, Outcome};

/// Pass the turn to the next team, wrapping around.
///
/// Clears the transient roll and bumps the turn number.
#[must_use]
pub fn advance_turn(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.rotate_turn();
    next
}

/// Forfeit the current team's turn if it owes a skip.
///
/// Returns the new state when a skip was consumed (one skip spent, outcome
/// recorded, turn passed) and `None` when the team may move normally.
#[must_use]
pub fn consume_skip(state: &GameState) -> Option<GameState> {
    let mut next = state.clone();
    apply_skip(&mut next).then_some(next)
}

/// In-place form of [`consume_skip`]. Returns true if the turn was forfeited.
pub(crate) fn apply_skip(state: &mut GameState) -> bool {
    let team = state.current_team_mut();
    if !team.take_skip() {
        return false;
    }
    let name = team.name.clone();
    log::debug!("{name} forfeits a turn ({} skip(s) left)", team.skip);

    state.set_outcome(Outcome::Skipped { team: name });
    state.rotate_turn();
    true
}
