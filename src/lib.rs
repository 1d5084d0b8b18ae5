//! Two-player, zero-sum, perfect-information game engines with
//! depth-limited adversarial search.
//!
//! `chess` and `checkers` provide bit-packed positions and legal move
//! generation; `player::ai` searches any `GameState` with minimax or
//! alpha-beta against a pluggable evaluator.

pub mod checkers;
pub mod chess;
pub mod core;
pub mod game;
pub mod player;

pub use crate::core::{Game, GameError, GameState, Outcome, SearchNode, Side};
pub use checkers::Checkers;
pub use chess::Chess;
pub use player::Policy;
