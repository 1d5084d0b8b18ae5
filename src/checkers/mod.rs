//! American checkers on the 32 dark cells of an 8x8 board.
//!
//! Captures are forced, multi-jumps are chained into one turn, and a man
//! reaching the far row is crowned, which ends the turn.

pub mod action;
mod movegen;
pub mod position;

#[cfg(test)]
mod checkers_tests;

pub use action::{cell_coords, cell_index, CheckersAction};
pub use position::{CheckersPiece, CheckersPosition};

use crate::core::{Game, Side};
use crate::player::ai::eval::{CheckersMaterialEvaluator, EvaluatorKind, OutcomeEvaluator};
use crate::player::ai::evaluator::Evaluator;

pub struct Checkers;

impl Game for Checkers {
    type Position = CheckersPosition;

    const NAME: &'static str = "Checkers";

    fn initial_position() -> CheckersPosition {
        CheckersPosition::new()
    }

    fn side_name(side: Side) -> &'static str {
        match side {
            Side::First => "Black",
            Side::Second => "Red",
        }
    }

    fn evaluator(kind: EvaluatorKind) -> Box<dyn Evaluator<CheckersPosition>> {
        match kind {
            EvaluatorKind::Outcome => Box::new(OutcomeEvaluator::default()),
            EvaluatorKind::Material => Box::new(CheckersMaterialEvaluator::default()),
        }
    }
}
