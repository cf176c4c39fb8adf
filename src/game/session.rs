//! A running game: board, configuration, dice, question source and the
//! current snapshot, behind one action surface.

use std::time::Duration;

use smallvec::SmallVec;

use crate::challenge::{Answer, ChallengeDescriptor, ChallengeProvider, ChallengeTimer, QuestionDeck};
use crate::core::{
    ChallengeId, Command, ConstructionError, DiceSource, GameConfig, GameRng, GameState,
    RegionId, RegionRegistry, Team, TeamId, MAX_TEAMS,
};
use crate::rules::{self, RulesContext, Standing, Transition};

/// One game session.
///
/// Every action goes through [`Game::apply`], which runs the reducer and
/// keeps the snapshot only if the command was accepted. The session also
/// deals a question whenever a challenge opens and, when
/// [`GameConfig::challenge_seconds`] is set, arms the countdown for it.
///
/// ## Example
///
/// ```
/// use region_conquest::core::{GameConfig, Phase, RegionRegistry, ScriptedDice};
/// use region_conquest::game::Game;
///
/// let config = GameConfig::default().with_teams(2);
/// let mut game = Game::with_dice(RegionRegistry::systems(), config, ScriptedDice::new([1])).unwrap();
///
/// game.start();
/// assert_eq!(game.state().phase(), Phase::Playing);
///
/// game.roll_and_move();
/// assert!(game.state().pending().is_some());
///
/// game.resolve_challenge(true);
/// assert_eq!(game.state().team_count(), 2);
/// assert_eq!(game.state().total_owned(), 1);
/// ```
pub struct Game<D: DiceSource = GameRng> {
    registry: RegionRegistry,
    config: GameConfig,
    dice: D,
    provider: Box<dyn ChallengeProvider>,
    state: GameState,
    timer: ChallengeTimer,
    question: Option<(ChallengeId, ChallengeDescriptor)>,
}

impl Game<GameRng> {
    /// Start a session seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate.
    pub fn initialize(registry: RegionRegistry, config: GameConfig) -> Result<Self, ConstructionError> {
        let dice = GameRng::new(config.seed);
        Self::with_dice(registry, config, dice)
    }
}

impl<D: DiceSource> Game<D> {
    /// Start a session drawing rolls from `dice`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate.
    pub fn with_dice(registry: RegionRegistry, config: GameConfig, dice: D) -> Result<Self, ConstructionError> {
        let state = GameState::from_config(&registry, &config)?;
        log::info!(
            "new {:?} game: {} teams on {} regions",
            config.mode,
            config.team_count,
            registry.len()
        );
        Ok(Self {
            registry,
            config,
            dice,
            provider: Box::new(QuestionDeck::default()),
            state,
            timer: ChallengeTimer::new(),
            question: None,
        })
    }

    /// Replace the question source.
    #[must_use]
    pub fn with_provider(mut self, provider: impl ChallengeProvider + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    // === Queries ===

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The board.
    #[must_use]
    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Session configuration. `team_count` follows accepted roster edits.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The team whose turn it is.
    #[must_use]
    pub fn current_team(&self) -> &Team {
        self.state.current_team()
    }

    /// The question for the pending challenge.
    #[must_use]
    pub fn challenge(&self) -> Option<&ChallengeDescriptor> {
        self.question.as_ref().map(|(_, q)| q)
    }

    /// Time left to answer, if the countdown is running.
    #[must_use]
    pub fn time_left(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    /// Commands that would be accepted now.
    #[must_use]
    pub fn legal_commands(&self) -> SmallVec<[Command; 4]> {
        rules::legal_commands(&RulesContext::new(&self.registry, &self.config), &self.state)
    }

    /// Scoreboard, best first.
    #[must_use]
    pub fn standings(&self) -> SmallVec<[Standing; MAX_TEAMS]> {
        rules::standings(&self.state)
    }

    /// The dice, e.g. to capture a `GameRng` state.
    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    // === Actions ===

    /// Apply any command. The snapshot is replaced only if it was accepted.
    pub fn apply(&mut self, command: Command) -> Transition {
        let ctx = RulesContext::new(&self.registry, &self.config);
        let transition = rules::reduce(&ctx, &self.state, &command, &mut self.dice);
        if transition.is_accepted() {
            self.state = transition.state.clone();
            self.config.team_count = self.state.team_count();
            self.sync_challenge();
        }
        transition
    }

    /// Back to setup with the same number of teams.
    pub fn reset(&mut self) -> Transition {
        self.apply(Command::Reset)
    }

    /// Rebuild the roster (setup only).
    pub fn set_team_count(&mut self, count: usize) -> Transition {
        self.apply(Command::SetTeamCount { count })
    }

    /// Rename a team (setup only).
    pub fn rename_team(&mut self, team: TeamId, name: impl Into<String>) -> Transition {
        self.apply(Command::RenameTeam {
            team,
            name: name.into(),
        })
    }

    /// Leave setup.
    pub fn start(&mut self) -> Transition {
        self.apply(Command::Start)
    }

    /// Claim a home region (home-base mode).
    pub fn pick_home(&mut self, team: TeamId, region: impl Into<RegionId>) -> Transition {
        self.apply(Command::PickHome {
            team,
            region: region.into(),
        })
    }

    /// Roll for the current team.
    pub fn roll_and_move(&mut self) -> Transition {
        self.apply(Command::RollDie)
    }

    /// Resolve whatever challenge is pending.
    pub fn resolve_challenge(&mut self, success: bool) -> Transition {
        self.apply(Command::answer(success))
    }

    /// Resolve `challenge`; ignored if it is no longer pending.
    pub fn resolve_challenge_for(&mut self, challenge: ChallengeId, success: bool) -> Transition {
        self.apply(Command::answer_for(challenge, success))
    }

    /// Judge `answer` against the dealt question and resolve with the verdict.
    pub fn answer(&mut self, answer: Answer) -> Transition {
        let command = match &self.question {
            Some((id, question)) => Command::answer_for(*id, question.evaluate(&answer)),
            None => Command::answer(false),
        };
        self.apply(command)
    }

    /// Advance the countdown. Returns the transition if time ran out.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Transition> {
        let command = self.timer.tick(elapsed)?;
        Some(self.apply(command))
    }

    /// Deal a question and arm the countdown for a newly opened challenge;
    /// drop both once it is gone.
    fn sync_challenge(&mut self) {
        let Some(pending) = self.state.pending() else {
            self.question = None;
            self.timer.cancel();
            return;
        };
        if self.question.as_ref().is_some_and(|(id, _)| *id == pending.id) {
            return;
        }

        let id = pending.id;
        let question = match self.registry.get(&pending.region) {
            Some(region) => self.provider.challenge_for(region),
            None => ChallengeDescriptor::freeform(pending.region.to_string()),
        };
        log::debug!("{id}: dealt \"{}\"", question.prompt);
        self.question = Some((id, question));

        match self.config.challenge_seconds {
            Some(seconds) => self.timer.arm(id, Duration::from_secs(u64::from(seconds))),
            None => self.timer.cancel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, Rejection, ScriptedDice};

    fn game(config: GameConfig, rolls: &[u8]) -> Game<ScriptedDice> {
        let registry = RegionRegistry::numbered("sec", 12).unwrap();
        Game::with_dice(registry, config, ScriptedDice::new(rolls.iter().copied())).unwrap()
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let config = GameConfig::default().with_teams(0);
        assert!(matches!(
            Game::initialize(RegionRegistry::systems(), config),
            Err(ConstructionError::NoTeams)
        ));
    }

    #[test]
    fn test_question_dealt_on_open() {
        let deck = QuestionDeck::new(vec![ChallengeDescriptor::multiple_choice("pick", ["a", "b"], 1)]);
        let mut g = game(GameConfig::default(), &[1]).with_provider(deck);
        g.start();
        assert!(g.challenge().is_none());

        g.roll_and_move();
        assert_eq!(g.challenge().unwrap().prompt, "pick");

        let t = g.answer(Answer::Choice(1));
        assert!(t.is_accepted());
        assert!(g.challenge().is_none());
        assert!(g.state().team(TeamId::new(0)).unwrap().owns(&RegionId::new("sec-2")));
    }

    #[test]
    fn test_wrong_choice_fails() {
        let deck = QuestionDeck::new(vec![ChallengeDescriptor::multiple_choice("pick", ["a", "b"], 1)]);
        let mut g = game(GameConfig::default(), &[1]).with_provider(deck);
        g.start();
        g.roll_and_move();

        g.answer(Answer::Choice(0));
        assert_eq!(g.state().total_owned(), 0);
        assert_eq!(g.state().current_index(), 1);
    }

    #[test]
    fn test_countdown_times_out() {
        let config = GameConfig::default().with_challenge_seconds(60);
        let mut g = game(config, &[1]);
        g.start();
        g.roll_and_move();
        assert_eq!(g.time_left(), Some(Duration::from_secs(60)));

        assert!(g.tick(Duration::from_secs(30)).is_none());
        let t = g.tick(Duration::from_secs(30)).unwrap();

        assert!(t.is_accepted());
        assert!(g.state().pending().is_none());
        assert_eq!(g.state().current_index(), 1);
        assert_eq!(g.time_left(), None);
    }

    #[test]
    fn test_answer_cancels_countdown() {
        let config = GameConfig::default().with_challenge_seconds(10);
        let mut g = game(config, &[1]);
        g.start();
        g.roll_and_move();

        g.resolve_challenge(true);
        assert_eq!(g.time_left(), None);
        assert!(g.tick(Duration::from_secs(60)).is_none());
    }

    #[test]
    fn test_rejected_command_keeps_state() {
        let mut g = game(GameConfig::default(), &[1]);
        let before = g.state().clone();

        let t = g.roll_and_move();

        assert_eq!(
            t.rejection,
            Some(Rejection::InvalidPhaseTransition {
                action: "roll",
                phase: Phase::Setup
            })
        );
        assert_eq!(g.state(), &before);
    }

    #[test]
    fn test_reset_clears_question_and_timer() {
        let config = GameConfig::default().with_challenge_seconds(10);
        let mut g = game(config, &[1]);
        g.start();
        g.roll_and_move();

        g.reset();
        assert_eq!(g.state().phase(), Phase::Setup);
        assert!(g.challenge().is_none());
        assert_eq!(g.time_left(), None);
    }

    #[test]
    fn test_config_tracks_team_count() {
        let mut g = game(GameConfig::default().with_teams(2), &[1]);
        assert_eq!(g.config().team_count, 2);

        assert!(g.set_team_count(5).is_accepted());
        assert_eq!(g.config().team_count, 5);

        assert!(!g.set_team_count(9).is_accepted());
        assert_eq!(g.config().team_count, 5);

        g.reset();
        assert_eq!(g.state().team_count(), 5);
        assert_eq!(g.config().team_count, 5);
    }
}
