//! Dice: deterministic, injectable randomness for movement rolls.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical roll sequence
//! - **Injectable**: Rules draw through the [`DiceSource`] trait, never a global
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use region_conquest::core::{DiceRange, DiceSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! let range = DiceRange::default();
//!
//! for _ in 0..20 {
//!     let roll = a.roll(range);
//!     assert_eq!(roll, b.roll(range));
//!     assert!((1..=4).contains(&roll));
//! }
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Inclusive range a movement roll is drawn from.
///
/// Defaults to 1-4 for fast pacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRange {
    /// Smallest possible roll (at least 1).
    pub min: u8,
    /// Largest possible roll (at least `min`).
    pub max: u8,
}

impl DiceRange {
    /// Create a new range. Validity is checked by `GameConfig::validate`.
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Check that the range is non-empty and never rolls zero.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.min >= 1 && self.min <= self.max
    }

    /// Clamp a value into the range.
    #[must_use]
    pub fn clamp(self, value: u8) -> u8 {
        value.clamp(self.min, self.max)
    }

    /// Number of distinct faces.
    #[must_use]
    pub const fn faces(self) -> u8 {
        self.max - self.min + 1
    }
}

impl Default for DiceRange {
    fn default() -> Self {
        Self { min: 1, max: 4 }
    }
}

/// Source of movement rolls.
///
/// The rules never reach for ambient randomness: every roll is drawn from
/// the source handed to the reducer, so tests can swap in [`ScriptedDice`].
pub trait DiceSource {
    /// Draw one roll inside `range` (inclusive on both ends).
    fn roll(&mut self, range: DiceRange) -> u8;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll(&mut self, range: DiceRange) -> u8 {
        (**self).roll(range)
    }
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll(&mut self, range: DiceRange) -> u8 {
        (**self).roll(range)
    }
}

/// Seedable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    rolls: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            rolls: 0,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of rolls drawn so far.
    #[must_use]
    pub fn rolls(&self) -> u64 {
        self.rolls
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            rolls: self.rolls,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            rolls: state.rolls,
        }
    }
}

impl DiceSource for GameRng {
    fn roll(&mut self, range: DiceRange) -> u8 {
        self.rolls += 1;
        if range.min >= range.max {
            return range.min;
        }
        self.inner.gen_range(range.min..=range.max)
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of
/// how many rolls have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Rolls drawn before the capture
    pub rolls: u64,
}

/// Dice that replay a fixed script, cycling when exhausted.
///
/// Scripted values are clamped into the requested range.
///
/// ```
/// use region_conquest::core::{DiceRange, DiceSource, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([3, 1]);
/// let range = DiceRange::default();
/// assert_eq!(dice.roll(range), 3);
/// assert_eq!(dice.roll(range), 1);
/// assert_eq!(dice.roll(range), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    script: VecDeque<u8>,
    drawn: usize,
}

impl ScriptedDice {
    /// Create dice that replay `rolls` in order.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: rolls.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Append more rolls to the end of the script.
    pub fn push(&mut self, roll: u8) {
        self.script.push_back(roll);
    }

    /// Number of rolls drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, range: DiceRange) -> u8 {
        self.drawn += 1;
        match self.script.pop_front() {
            Some(value) => {
                self.script.push_back(value);
                range.clamp(value)
            }
            None => range.min,
        }
    }
}
