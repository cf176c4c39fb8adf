//! Property-based tests over random command sequences.
//!
//! Each case seeds the dice, then feeds the reducer a mix of legal commands
//! and deliberate misuse, checking structural invariants after every step.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use region_conquest::core::{
    ChallengeId, Command, GameConfig, GameMode, GameRng, GameState, RegionId, RegionRegistry, TeamId,
};
use region_conquest::rules::{legal_commands, reduce, RulesContext};

/// A step: either pick among the legal commands, or throw in misuse.
#[derive(Clone, Debug)]
enum Step {
    Legal(usize),
    Roll,
    Answer(bool),
    Stale(u64),
    Pick(u8, usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => any::<usize>().prop_map(Step::Legal),
        1 => Just(Step::Roll),
        1 => any::<bool>().prop_map(Step::Answer),
        1 => (0u64..40).prop_map(Step::Stale),
        1 => (0u8..8, 0usize..14).prop_map(|(t, r)| Step::Pick(t, r)),
    ]
}

fn command(ctx: &RulesContext<'_>, state: &GameState, step: &Step, allow_reset: bool) -> Command {
    match step {
        Step::Legal(i) => {
            let legal: Vec<_> = legal_commands(ctx, state)
                .into_iter()
                .filter(|c| allow_reset || *c != Command::Reset)
                .collect();
            if legal.is_empty() {
                // Finished with reset excluded: nothing is legal, so misuse
                return Command::RollDie;
            }
            legal[i % legal.len()].clone()
        }
        Step::Roll => Command::RollDie,
        Step::Answer(ok) => Command::answer(*ok),
        Step::Stale(id) => Command::timeout(ChallengeId::new(*id)),
        Step::Pick(team, region) => Command::PickHome {
            team: TeamId::new(*team),
            region: RegionId::new(format!("sec-{region}")),
        },
    }
}

fn mode(home_base: bool) -> GameMode {
    if home_base {
        GameMode::HomeBase
    } else {
        GameMode::Classic
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Ownership stays disjoint and bounded, the turn pointer stays in
    /// range, the phase only moves forward between resets, and rejected
    /// commands leave the state untouched.
    #[test]
    fn prop_invariants_hold(
        seed in any::<u64>(),
        teams in 1usize..=6,
        home_base in any::<bool>(),
        steps in prop::collection::vec(step(), 1..200)
    ) {
        let registry = RegionRegistry::numbered("sec", 8).unwrap();
        let config = GameConfig::default().with_teams(teams).with_mode(mode(home_base));
        let ctx = RulesContext::new(&registry, &config);
        let mut dice = GameRng::new(seed);
        let mut state = GameState::from_config(&registry, &config).unwrap();

        for s in &steps {
            let cmd = command(&ctx, &state, s, true);
            let t = reduce(&ctx, &state, &cmd, &mut dice);

            prop_assert!(t.state.is_consistent());
            prop_assert!(t.state.current_index() < t.state.team_count());
            prop_assert!(t.state.total_owned() <= registry.len());

            match &t.rejection {
                Some(_) => prop_assert_eq!(&t.state, &state),
                None if cmd == Command::Reset => {}
                None => prop_assert!(t.state.phase().ordinal() >= state.phase().ordinal()),
            }

            if let Some(winner) = t.state.winner() {
                prop_assert!(t.state.is_finished());
                prop_assert_eq!(
                    t.state.team(winner).unwrap().owned_count(),
                    registry.len()
                );
            }
            state = t.state;
        }
    }

    /// Successful captures only grow the capturer's holdings.
    #[test]
    fn prop_capture_is_monotonic(
        seed in any::<u64>(),
        steps in prop::collection::vec(any::<usize>(), 1..150)
    ) {
        let registry = RegionRegistry::numbered("sec", 10).unwrap();
        let config = GameConfig::default().with_teams(3);
        let ctx = RulesContext::new(&registry, &config);
        let mut dice = GameRng::new(seed);
        let mut state = GameState::from_config(&registry, &config).unwrap();

        for i in steps {
            let cmd = command(&ctx, &state, &Step::Legal(i), false);
            let actor = state.current_team_id();
            let pending = state.pending().cloned();
            let before = state.team(actor).unwrap().owned.clone();

            let t = reduce(&ctx, &state, &cmd, &mut dice);

            if let (Some(pending), Command::ResolveChallenge { success: true, .. }) = (pending, &cmd) {
                let after = &t.state.team(actor).unwrap().owned;
                prop_assert!(before.is_subset(after));
                prop_assert!(after.contains(&pending.region));
                prop_assert_eq!(t.state.owner_of(&pending.region), Some(actor));
            }
            state = t.state;
        }
    }

    /// Replaying the recorded history with the same seed reproduces the game.
    #[test]
    fn prop_replay_is_deterministic(
        seed in any::<u64>(),
        home_base in any::<bool>(),
        steps in prop::collection::vec(step(), 1..120)
    ) {
        let registry = RegionRegistry::numbered("sec", 6).unwrap();
        let config = GameConfig::default().with_teams(4).with_mode(mode(home_base));
        let ctx = RulesContext::new(&registry, &config);
        let initial = GameState::from_config(&registry, &config).unwrap();

        let mut dice = GameRng::new(seed);
        let mut state = initial.clone();
        for s in &steps {
            let cmd = command(&ctx, &state, s, false);
            state = reduce(&ctx, &state, &cmd, &mut dice).state;
        }

        let mut replay_dice = GameRng::new(seed);
        let mut replay = initial;
        for record in state.history() {
            let t = reduce(&ctx, &replay, &record.command, &mut replay_dice);
            prop_assert!(t.is_accepted());
            replay = t.state;
        }

        prop_assert_eq!(replay, state);
        prop_assert_eq!(replay_dice.rolls(), dice.rolls());
    }
}
