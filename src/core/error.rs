//! Error types shared by the game engines and the search AIs.

use super::types::Side;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("winner requested for a position that is not game over")]
    NotGameOver,

    #[error("side {side} chose an illegal move: {action}")]
    IllegalMove { side: Side, action: String },

    #[error("no move can be chosen for {0}: the game is over")]
    GameOver(Side),

    #[error("action {action} cannot be applied: {reason}")]
    IllegalAction { action: String, reason: String },

    #[error("invalid board setup: {0}")]
    InvalidSetup(String),
}

impl GameError {
    pub(crate) fn illegal_action(action: impl ToString, reason: impl Into<String>) -> Self {
        GameError::IllegalAction {
            action: action.to_string(),
            reason: reason.into(),
        }
    }
}
