use super::search::ensure_playable;
use crate::core::{GameError, GameState, SearchNode};
use crate::player::Policy;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Uniformly random legal move.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAI;

impl<S: GameState> Policy<S> for RandomAI {
    fn pick_move(&self, position: &S, rng: &mut dyn RngCore) -> Result<SearchNode<S>, GameError> {
        ensure_playable(position)?;
        position
            .children()
            .choose(rng)
            .cloned()
            .ok_or(GameError::GameOver(position.side_to_move()))
    }

    fn name(&self) -> String {
        "random".to_string()
    }
}
