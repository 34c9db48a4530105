use std::path::PathBuf;

use anyhow::Context as _;
use tilewise_engine::GameSeed;
use tilewise_evaluator::search::SearchAlgorithm;

use crate::{schema::agent_config::AgentConfig, util};

/// Agent settings: an optional config file, overridden field by field from the command line.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AgentArg {
    /// Agent configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Search algorithm: expectimax, minimax or alphabeta
    #[arg(long)]
    algorithm: Option<SearchAlgorithm>,
    /// Fixed search depth
    #[arg(long)]
    depth: Option<usize>,
    /// Pick the search depth from the board before each move
    #[arg(long)]
    variable_depth: bool,
    /// Lower bound for variable depth
    #[arg(long)]
    min_depth: Option<usize>,
    /// Upper bound for variable depth
    #[arg(long)]
    max_depth: Option<usize>,
    /// Game seed (32 hex digits)
    #[arg(long)]
    seed: Option<GameSeed>,
    /// Maximum number of moves per game
    #[arg(long)]
    move_limit: Option<usize>,
}

impl AgentArg {
    /// Reads the config file (or defaults), applies overrides and validates the result.
    pub(crate) fn load(&self) -> anyhow::Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => AgentConfig::default(),
        };
        self.apply(&mut config);
        config.validate().with_context(|| match &self.config {
            Some(path) => format!("Invalid configuration in {}", path.display()),
            None => "Invalid configuration".to_owned(),
        })?;
        log::debug!("agent config: {config:?}");
        Ok(config)
    }

    fn apply(&self, config: &mut AgentConfig) {
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if self.variable_depth {
            config.variable_depth = true;
        }
        if let Some(min_depth) = self.min_depth {
            config.min_depth = min_depth;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(move_limit) = self.move_limit {
            config.move_limit = move_limit;
        }
    }
}
