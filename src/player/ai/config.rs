use super::eval::EvaluatorKind;
use super::{AlphaBetaAI, GreedyAI, MinimaxAI, RandomAI};
use crate::core::Game;
use crate::player::Policy;
use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "ai_config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Random,
    Greedy,
    Minimax,
    AlphaBeta,
}

/// AI設定
///
/// Missing fields fall back to `AIConfig::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AIConfig {
    pub version: String,
    pub algorithm: Algorithm,
    /// Search depth in plies; ignored by `random` and `greedy`.
    pub depth: u32,
    pub evaluator: EvaluatorKind,
    /// Seed for the tie-break random source. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read AI config {}", path.display()))?;
        Self::from_json(&config_str)
            .with_context(|| format!("failed to parse AI config {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: AIConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    fn validate(&self) -> anyhow::Result<()> {
        let searches = matches!(self.algorithm, Algorithm::Minimax | Algorithm::AlphaBeta);
        if searches && self.depth == 0 {
            bail!("search depth must be at least 1 ply, got 0");
        }
        Ok(())
    }

    /// Build the configured policy for game `G`.
    pub fn build<G: Game>(&self) -> Box<dyn Policy<G::Position>> {
        match self.algorithm {
            Algorithm::Random => Box::new(RandomAI),
            Algorithm::Greedy => Box::new(GreedyAI::new(G::evaluator(self.evaluator))),
            Algorithm::Minimax => Box::new(MinimaxAI::new(self.depth, G::evaluator(self.evaluator))),
            Algorithm::AlphaBeta => {
                Box::new(AlphaBetaAI::new(self.depth, G::evaluator(self.evaluator)))
            }
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            algorithm: Algorithm::AlphaBeta,
            depth: 3,
            evaluator: EvaluatorKind::Material,
            seed: None,
        }
    }
}
