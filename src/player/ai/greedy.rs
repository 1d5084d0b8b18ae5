use super::evaluator::Evaluator;
use super::search::{ensure_playable, leaf_score, SearchReport};
use crate::core::{GameError, GameState, SearchNode};
use crate::player::Policy;
use rand::RngCore;

/// One-ply lookahead: evaluates each child directly, ties broken at random.
pub struct GreedyAI<E> {
    evaluator: E,
}

impl<E> GreedyAI<E> {
    pub fn new(evaluator: E) -> Self {
        GreedyAI { evaluator }
    }
}

impl<S, E> Policy<S> for GreedyAI<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn pick_move(&self, position: &S, rng: &mut dyn RngCore) -> Result<SearchNode<S>, GameError> {
        ensure_playable(position)?;

        let mut report = SearchReport::new(position.side_to_move());
        for child in position.children().iter() {
            report.offer(child.clone(), leaf_score(&self.evaluator, &child.position, 1));
        }
        report.choose(rng)
    }

    fn name(&self) -> String {
        format!("greedy({})", self.evaluator.name())
    }
}
