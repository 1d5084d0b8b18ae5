use super::evaluator::Evaluator;
use super::search::{ensure_playable, leaf_score, SearchReport};
use crate::core::{GameError, GameState, SearchNode, Side};
use crate::player::Policy;
use rand::RngCore;
use tracing::{debug, info, trace};

/// Alpha-Beta枝刈り
///
/// Same scores as `MinimaxAI` at equal depth and evaluator. Each root child
/// is searched with a full window so that the whole tie set survives for
/// the random tie-break; pruning only happens below the root.
pub struct AlphaBetaAI<E> {
    pub depth: u32,
    evaluator: E,
}

impl<E> AlphaBetaAI<E> {
    /// `depth` is in plies and is raised to at least 1.
    pub fn new(depth: u32, evaluator: E) -> Self {
        AlphaBetaAI {
            depth: depth.max(1),
            evaluator,
        }
    }

    pub fn analyze<S>(&self, position: &S) -> Result<SearchReport<S>, GameError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        ensure_playable(position)?;

        let mut report = SearchReport::new(position.side_to_move());
        let mut nodes = 1;
        for child in position.children().iter() {
            let score = self.alpha_beta(&child.position, 1, i32::MIN, i32::MAX, &mut nodes);
            debug!(action = %child.action, score, "alpha-beta root child");
            report.offer(child.clone(), score);
        }
        report.nodes = nodes;
        Ok(report)
    }

    fn alpha_beta<S>(
        &self,
        position: &S,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
        nodes: &mut u64,
    ) -> i32
    where
        S: GameState,
        E: Evaluator<S>,
    {
        *nodes += 1;
        if ply >= self.depth || position.is_game_over() {
            return leaf_score(&self.evaluator, position, ply);
        }

        let children = position.children();
        match position.side_to_move() {
            Side::First => {
                let mut max_eval = i32::MIN;
                for child in children.iter() {
                    let eval = self.alpha_beta(&child.position, ply + 1, alpha, beta, nodes);
                    max_eval = max_eval.max(eval);
                    if eval >= beta {
                        trace!(ply, eval, beta, "beta cutoff");
                        break;
                    }
                    alpha = alpha.max(eval);
                }
                max_eval
            }
            Side::Second => {
                let mut min_eval = i32::MAX;
                for child in children.iter() {
                    let eval = self.alpha_beta(&child.position, ply + 1, alpha, beta, nodes);
                    min_eval = min_eval.min(eval);
                    if eval <= alpha {
                        trace!(ply, eval, alpha, "alpha cutoff");
                        break;
                    }
                    beta = beta.min(eval);
                }
                min_eval
            }
        }
    }
}

impl<S, E> Policy<S> for AlphaBetaAI<E>
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
            "alpha-beta picked a move"
        );
        Ok(chosen)
    }

    fn name(&self) -> String {
        format!("alpha-beta(depth={}, {})", self.depth, self.evaluator.name())
    }
}
