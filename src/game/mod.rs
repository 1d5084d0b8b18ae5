//! Turn-level protocol helpers for an external game loop.
//!
//! The loop itself (rendering, referee, match statistics) lives outside
//! this crate. What it needs from here is one validated step: ask the
//! side to move for a child and refuse anything that is not legal.

use crate::core::{GameError, GameState, SearchNode};
use crate::player::Policy;
use rand::RngCore;
use tracing::{debug, error};

/// Fails with `IllegalMove` unless `chosen` is one of `position`'s children.
pub fn ensure_legal<S: GameState>(position: &S, chosen: &SearchNode<S>) -> Result<(), GameError> {
    if position.children().iter().any(|child| child == chosen) {
        return Ok(());
    }
    error!(action = %chosen.action, "policy returned a move that is not a legal child");
    Err(GameError::IllegalMove {
        side: position.side_to_move(),
        action: chosen.action.to_string(),
    })
}

/// Ask `policy` for a move and check it before handing it back.
pub fn play_turn<S, P>(
    position: &S,
    policy: &P,
    rng: &mut dyn RngCore,
) -> Result<SearchNode<S>, GameError>
where
    S: GameState,
    P: Policy<S> + ?Sized,
{
    let chosen = policy.pick_move(position, rng)?;
    ensure_legal(position, &chosen)?;
    debug!(policy = %policy.name(), action = %chosen.action, "turn played");
    Ok(chosen)
}
