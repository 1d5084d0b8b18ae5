use super::evaluator::Evaluator;
use super::search::{ensure_playable, leaf_score, SearchReport};
use crate::core::{GameError, GameState, SearchNode, Side};
use crate::player::Policy;
use rand::RngCore;
use tracing::{debug, info};

/// Plain depth-limited minimax.
pub struct MinimaxAI<E> {
    pub depth: u32,
    evaluator: E,
}

impl<E> MinimaxAI<E> {
    /// `depth` is in plies and is raised to at least 1.
    pub fn new(depth: u32, evaluator: E) -> Self {
        MinimaxAI {
            depth: depth.max(1),
            evaluator,
        }
    }

    /// Score every root child and collect the tied best ones.
    pub fn analyze<S>(&self, position: &S) -> Result<SearchReport<S>, GameError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        ensure_playable(position)?;

        let mut report = SearchReport::new(position.side_to_move());
        let mut nodes = 1;
        for child in position.children().iter() {
            let score = self.minimax(&child.position, 1, &mut nodes);
            debug!(action = %child.action, score, "minimax root child");
            report.offer(child.clone(), score);
        }
        report.nodes = nodes;
        Ok(report)
    }

    fn minimax<S>(&self, position: &S, ply: u32, nodes: &mut u64) -> i32
    where
        S: GameState,
        E: Evaluator<S>,
    {
        *nodes += 1;
        if ply >= self.depth || position.is_game_over() {
            return leaf_score(&self.evaluator, position, ply);
        }

        let children = position.children();
        let scores = children
            .iter()
            .map(|child| self.minimax(&child.position, ply + 1, nodes));
        match position.side_to_move() {
            Side::First => scores.fold(i32::MIN, i32::max),
            Side::Second => scores.fold(i32::MAX, i32::min),
        }
    }
}

impl<S, E> Policy<S> for MinimaxAI<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn pick_move(&self, position: &S, rng: &mut dyn RngCore) -> Result<SearchNode<S>, GameError> {
        let report = self.analyze(position)?;
        let chosen = report.choose(rng)?;
        info!(
            action = %chosen.action,
            score = report.score,
            ties = report.best.len(),
            nodes = report.nodes,
            "minimax picked a move"
        );
        Ok(chosen)
    }

    fn name(&self) -> String {
        format!("minimax(depth={}, {})", self.depth, self.evaluator.name())
    }
}
