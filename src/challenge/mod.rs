//! Challenges: the question behind a pending capture, and its countdown.
//!
//! The rules only ever see a boolean. This module turns a region into a
//! question ([`ChallengeProvider`]), an [`Answer`] into that boolean
//! ([`ChallengeDescriptor::evaluate`]), and elapsed time into a timeout
//! command ([`ChallengeTimer`]).

pub mod descriptor;
pub mod provider;
pub mod timer;

pub use descriptor::{Answer, ChallengeDescriptor};
pub use provider::{ChallengeProvider, QuestionDeck};
pub use timer::ChallengeTimer;
