//! Chess without en passant, under-promotion or repetition draws.
//!
//! Castling, stalemate and the 50-move rule (100 half-moves without a
//! capture or pawn move) are supported; pawns always promote to queens.

pub mod action;
mod movegen;
pub mod piece;
pub mod position;


pub use action::{ChessAction, Square};
pub use piece::{Piece, PieceKind};
pub use position::ChessPosition;

use crate::core::{Game, Side};
use crate::player::ai::eval::{ChessMaterialEvaluator, EvaluatorKind, OutcomeEvaluator};
use crate::player::ai::evaluator::Evaluator;

pub struct Chess;

impl Game for Chess {
    type Position = ChessPosition;

    const NAME: &'static str = "Chess";

    fn initial_position() -> ChessPosition {
        ChessPosition::new()
    }

    fn side_name(side: Side) -> &'static str {
        match side {
            Side::First => "White",
            Side::Second => "Black",
        }
    }

    fn evaluator(kind: EvaluatorKind) -> Box<dyn Evaluator<ChessPosition>> {
        match kind {
            EvaluatorKind::Outcome => Box::new(OutcomeEvaluator::default()),
            EvaluatorKind::Material => Box::new(ChessMaterialEvaluator::default()),
        }
    }
}
