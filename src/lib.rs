//! # backgammon
//!
//! Rules engine for two-player backgammon: the board, seeded dice and a
//! [`backgammon::Game`] that validates and applies single-checker moves,
//! including hitting, reentering from the bar and bearing off.
//!
//! ```
//! use backgammon::backgammon::{Game, IdSequence, BEAR_OFF};
//!
//! let mut ids = IdSequence::new();
//! let mut game = Game::with_seed(ids.player("White"), ids.player("Black"), 0, 42).unwrap();
//! game.reset_standard_layout();
//!
//! let roll = game.roll().unwrap();
//! for half_move in game.legal_moves() {
//!     assert!(half_move.to < BEAR_OFF);
//!     assert!(roll.distances.contains(&half_move.distance));
//! }
//! ```
//!
//! The [`simulation`] module plays seeded random games in parallel and checks
//! the engine's invariants after every move; [`config`] holds its settings.

pub mod backgammon;
pub mod config;
pub mod misc;
pub mod simulation;
