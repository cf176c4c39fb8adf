//! # region-conquest
//!
//! A turn-based territory-conquest engine. Teams roll a small die to move a
//! token around a fixed ring of regions, answer a challenge to claim the
//! region they land on (or take it from its owner), and win by owning every
//! region.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: every rule is `&GameState -> GameState`. A
//!    snapshot is never mutated after it is published.
//!
//! 2. **One command set**: all user actions and timer expiries are
//!    [`Command`]s fed to a single reducer, [`rules::reduce`].
//!
//! 3. **Injected randomness**: dice come from a [`DiceSource`]; the default
//!    [`GameRng`] is a seeded ChaCha8 stream, so a seed plus a command list
//!    replays a game exactly.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`.
//!
//! - **Tagged challenges**: every pending challenge has a [`ChallengeId`].
//!   A resolution tagged with an id that is no longer active is dropped,
//!   so a late timeout can never resolve the wrong challenge.
//!
//! ## Modules
//!
//! - `core`: regions, teams, state, commands, dice, configuration, errors
//! - `rules`: turn, movement, challenge, win and home-base rules plus the reducer
//! - `challenge`: question descriptors, providers and the answer countdown
//! - `game`: the [`Game`] session wrapping it all behind one action surface

pub mod challenge;
pub mod core;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, ChallengeId, Command, ConstructionError, DiceRange, DiceSource, GameConfig,
    GameMode, GameRng, GameRngState, GameState, HomePickError, Outcome, Phase, Region, RegionId,
    RegionRegistry, Rejection, ScoringRules, ScriptedDice, Team, TeamId,
};

pub use crate::rules::{legal_commands, reduce, RulesContext, Standing, Transition};

pub use crate::challenge::{Answer, ChallengeDescriptor, ChallengeProvider, ChallengeTimer, QuestionDeck};

pub use crate::game::Game;
