pub mod alpha_beta;
pub mod config;
pub mod eval;
pub mod evaluator;
pub mod greedy;
pub mod minimax;
pub mod random;
pub mod search;


pub use alpha_beta::AlphaBetaAI;
pub use config::{AIConfig, Algorithm};
pub use eval::{
    CheckersMaterialEvaluator, ChessMaterialEvaluator, EvaluatorKind, OutcomeEvaluator, WIN_SCORE,
};
pub use evaluator::Evaluator;
pub use greedy::GreedyAI;
pub use minimax::MinimaxAI;
pub use random::RandomAI;
pub use search::SearchReport;
