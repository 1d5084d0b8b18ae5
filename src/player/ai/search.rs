//! Shared pieces of the depth-limited searches.

use super::evaluator::Evaluator;
use crate::core::{GameError, GameState, SearchNode, Side};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Result of searching every child of a root position.
#[derive(Debug, Clone)]
pub struct SearchReport<S: GameState> {
    /// Side to move at the root; decides whether `score` is a max or a min.
    pub side: Side,
    /// Extremal child score.
    pub score: i32,
    /// Every root child reaching `score`, in generation order.
    pub best: Vec<SearchNode<S>>,
    /// Positions visited, the root included.
    pub nodes: u64,
}

impl<S: GameState> SearchReport<S> {
    pub(crate) fn new(side: Side) -> Self {
        SearchReport {
            side,
            score: 0,
            best: Vec::new(),
            nodes: 0,
        }
    }

    /// Record a root child with its backed-up score.
    pub(crate) fn offer(&mut self, node: SearchNode<S>, score: i32) {
        let improves = match self.side {
            Side::First => score > self.score,
            Side::Second => score < self.score,
        };
        if self.best.is_empty() || improves {
            self.score = score;
            self.best.clear();
            self.best.push(node);
        } else if score == self.score {
            self.best.push(node);
        }
    }

    /// Uniform random pick among the tied best children.
    pub fn choose(&self, rng: &mut dyn RngCore) -> Result<SearchNode<S>, GameError> {
        self.best
            .choose(rng)
            .cloned()
            .ok_or(GameError::GameOver(self.side))
    }
}

/// Score of a search leaf at `ply` plies below the root.
///
/// Finished games are pulled toward zero by the ply count, so faster wins
/// and slower losses score better for the side concerned.
pub(crate) fn leaf_score<S, E>(evaluator: &E, position: &S, ply: u32) -> i32
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
{
    let score = evaluator.evaluate(position);
    if position.is_game_over() {
        score - score.signum() * ply as i32
    } else {
        score
    }
}

/// Root guard shared by every policy.
pub(crate) fn ensure_playable<S: GameState>(position: &S) -> Result<(), GameError> {
    if position.is_game_over() {
        return Err(GameError::GameOver(position.side_to_move()));
    }
    Ok(())
}
