pub mod error;
pub mod state;
pub mod types;


pub use error::GameError;
pub use state::{Game, GameState, SearchNode};
pub use types::{Outcome, Side};
