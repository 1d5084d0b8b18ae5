pub mod ai;
pub mod policy;

pub use ai::{AIConfig, AlphaBetaAI, GreedyAI, MinimaxAI, RandomAI};
pub use policy::Policy;
