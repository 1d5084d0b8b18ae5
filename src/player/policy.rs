use crate::core::{GameError, GameState, SearchNode};
use rand::RngCore;

/// 手を選ぶプレイヤーのtrait
///
/// A policy returns one of `position.children()`. The random source is
/// passed in by the caller so that games can be replayed from a seed.
pub trait Policy<S: GameState> {
    /// Fails with `GameError::GameOver` when the position is already finished.
    fn pick_move(&self, position: &S, rng: &mut dyn RngCore) -> Result<SearchNode<S>, GameError>;

    fn name(&self) -> String;
}

impl<S: GameState, P: Policy<S> + ?Sized> Policy<S> for Box<P> {
    fn pick_move(&self, position: &S, rng: &mut dyn RngCore) -> Result<SearchNode<S>, GameError> {
        (**self).pick_move(position, rng)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}
