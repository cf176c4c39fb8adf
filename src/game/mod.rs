//! The public action surface.

pub mod session;

pub use session::Game;
