//! Game rules as pure transitions over [`GameState`](crate::core::GameState).
//!
//! Each submodule owns one concern:
//! - `turn`: turn rotation and forced skips
//! - `movement`: rolling and landing
//! - `challenge`: resolving a pending challenge into score and ownership
//! - `win`: full-ownership detection and standings
//! - `homes`: the home-base pick phase
//! - `engine`: the reducer that dispatches a [`Command`](crate::core::Command)
//!
//! Every rule takes `&GameState` and returns a new state; nothing here holds
//! mutable state of its own.

pub mod challenge;
pub mod engine;
pub mod homes;
pub mod movement;
pub mod turn;
pub mod win;

pub use challenge::resolve_challenge;
pub use engine::{legal_commands, reduce, RulesContext, Transition};
pub use homes::{available_homes, pick_home};
pub use movement::{landing, roll_and_move, Landing};
pub use turn::{advance_turn, consume_skip};
pub use win::{check_win, is_game_over, leader, standings, Standing};
