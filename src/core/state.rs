use super::error::GameError;
use super::types::{Outcome, Side};
use crate::player::ai::eval::EvaluatorKind;
use crate::player::ai::evaluator::Evaluator;
use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

/// One edge of the game tree: the action played and the position it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchNode<S: GameState> {
    pub action: S::Action,
    pub position: S,
}

impl<S: GameState> SearchNode<S> {
    pub fn new(action: S::Action, position: S) -> Self {
        SearchNode { action, position }
    }
}

/// An immutable position of a two-player, zero-sum, perfect-information game.
///
/// Positions compare and hash by their packed contents only, so two
/// independently built positions with the same pieces, side to move and
/// status bits are interchangeable.
pub trait GameState: Clone + Eq + Hash + fmt::Debug {
    type Action: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    fn side_to_move(&self) -> Side;

    /// Legal successors in generation order.
    ///
    /// Empty exactly when the side to move cannot move. A position may still
    /// be game over with children left (draw by the progress limit), so
    /// callers must ask `is_game_over` rather than test for emptiness.
    fn children(&self) -> Cow<'_, [SearchNode<Self>]>;

    fn is_game_over(&self) -> bool;

    /// Only meaningful once `is_game_over` is true.
    fn winner(&self) -> Result<Outcome, GameError>;
}

/// A concrete game: its initial position, naming and evaluator roster.
pub trait Game {
    type Position: GameState + 'static;

    const NAME: &'static str;

    fn initial_position() -> Self::Position;

    fn side_name(side: Side) -> &'static str;

    fn tie_name() -> &'static str {
        "draw"
    }

    fn evaluator(kind: EvaluatorKind) -> Box<dyn Evaluator<Self::Position>>;
}
