//! Baseline evaluators for chess and checkers.

use super::evaluator::Evaluator;
use crate::checkers::CheckersPosition;
use crate::chess::{ChessPosition, PieceKind, Square};
use crate::core::{GameState, Outcome, Side};
use serde::{Deserialize, Serialize};

/// Score of a won game; dominates every positional term.
pub const WIN_SCORE: i32 = 10_000_000;

/// Evaluator selection for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    /// Only distinguishes won, lost and drawn positions.
    Outcome,
    /// Material count on top of the outcome score.
    Material,
}

/// Scores finished games as +-`win_score` (0 for a draw) and everything else as 0.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeEvaluator {
    pub win_score: i32,
}

impl Default for OutcomeEvaluator {
    fn default() -> Self {
        OutcomeEvaluator {
            win_score: WIN_SCORE,
        }
    }
}

impl OutcomeEvaluator {
    /// `Some(score)` for a finished game, `None` while it is still running.
    pub fn terminal_score<S: GameState>(&self, position: &S) -> Option<i32> {
        if !position.is_game_over() {
            return None;
        }
        match position.winner() {
            Ok(Outcome::Winner(side)) => Some(side.eval_sign() * self.win_score),
            _ => Some(0),
        }
    }
}

impl<S: GameState> Evaluator<S> for OutcomeEvaluator {
    fn evaluate(&self, position: &S) -> i32 {
        self.terminal_score(position).unwrap_or(0)
    }

    fn name(&self) -> &str {
        "outcome"
    }
}

/// Centipawn material. A piece attacked and not defended counts half,
/// a defended piece earns a small bonus.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessMaterialEvaluator {
    outcome: OutcomeEvaluator,
}

fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight | PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

impl Evaluator<ChessPosition> for ChessMaterialEvaluator {
    fn evaluate(&self, position: &ChessPosition) -> i32 {
        if let Some(score) = self.outcome.terminal_score(position) {
            return score;
        }

        let mut score = 0;
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col);
                let Some(piece) = position.piece_at(sq) else {
                    continue;
                };
                if piece.kind == PieceKind::King {
                    continue;
                }
                let mut value = piece_value(piece.kind);
                if position.is_attacked(piece.side.opponent(), sq) {
                    value += 10;
                } else if position.is_attacked(piece.side, sq) {
                    value /= 2;
                }
                score += piece.side.eval_sign() * value;
            }
        }
        score
    }

    fn name(&self) -> &str {
        "chess-material"
    }
}

/// One point per man, three per king.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckersMaterialEvaluator {
    outcome: OutcomeEvaluator,
}

impl Evaluator<CheckersPosition> for CheckersMaterialEvaluator {
    fn evaluate(&self, position: &CheckersPosition) -> i32 {
        if let Some(score) = self.outcome.terminal_score(position) {
            return score;
        }
        [Side::First, Side::Second]
            .into_iter()
            .map(|side| {
                let (men, kings) = position.piece_count(side);
                side.eval_sign() * (men + 3 * kings) as i32
            })
            .sum()
    }

    fn name(&self) -> &str {
        "checkers-material"
    }
}
