use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tilewise_engine::GameSeed;
use tilewise_evaluator::{
    board_evaluator::FeatureBasedBoardEvaluator,
    depth_policy::DepthPolicy,
    search::{SearchAlgorithm, SearchEngine},
    session_runner::SessionRunner,
    weights::HeuristicWeights,
};

/// Settings for the search agent and batch runs, as stored in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub algorithm: SearchAlgorithm,
    pub depth: usize,
    pub variable_depth: bool,
    pub min_depth: usize,
    pub max_depth: usize,
    #[serde(alias = "heuristic_weights")]
    pub weights: HeuristicWeights,
    pub num_games: usize,
    pub save_results: bool,
    pub output_file: PathBuf,
    pub move_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<GameSeed>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::default(),
            depth: 4,
            variable_depth: false,
            min_depth: 2,
            max_depth: 6,
            weights: HeuristicWeights::default(),
            num_games: 10,
            save_results: true,
            output_file: PathBuf::from("results.json"),
            move_limit: 100_000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("depth must be at least 1, got {depth}")]
    Depth { depth: usize },
    #[display("min_depth must be at least 1, got {min_depth}")]
    MinDepth { min_depth: usize },
    #[display("max_depth ({max_depth}) must not be less than min_depth ({min_depth})")]
    MaxDepth { min_depth: usize, max_depth: usize },
    #[display("num_games must be at least 1")]
    NumGames,
    #[display("weights.{name} must be a finite number")]
    Weight { name: &'static str },
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth < 1 {
            return Err(ConfigError::Depth { depth: self.depth });
        }
        if self.min_depth < 1 {
            return Err(ConfigError::MinDepth {
                min_depth: self.min_depth,
            });
        }
        if self.max_depth < self.min_depth {
            return Err(ConfigError::MaxDepth {
                min_depth: self.min_depth,
                max_depth: self.max_depth,
            });
        }
        if self.num_games < 1 {
            return Err(ConfigError::NumGames);
        }
        if let Some(name) = self.weights.first_non_finite() {
            return Err(ConfigError::Weight { name });
        }
        Ok(())
    }

    pub fn depth_policy(&self) -> DepthPolicy {
        if self.variable_depth {
            DepthPolicy::Variable {
                min: self.min_depth,
                max: self.max_depth,
            }
        } else {
            DepthPolicy::Fixed(self.depth)
        }
    }

    pub fn search_engine(&self) -> SearchEngine<'static> {
        let evaluator = FeatureBasedBoardEvaluator::from_weights(&self.weights);
        SearchEngine::new(self.algorithm, Box::new(evaluator))
    }

    pub fn session_runner(&self) -> SessionRunner<'static> {
        SessionRunner::new(self.search_engine(), self.depth_policy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AgentConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.depth_policy(), DepthPolicy::Fixed(4));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AgentConfig = serde_json::from_str(
            r#"{ "algorithm": "alphabeta", "variable_depth": true, "weights": { "corner": 0 } }"#,
        )
        .unwrap();
        assert_eq!(config.algorithm, SearchAlgorithm::AlphaBeta);
        assert_eq!(config.depth_policy(), DepthPolicy::Variable { min: 2, max: 6 });
        assert_eq!(config.weights.corner, 0.0);
        assert_eq!(config.weights.empty, 1000.0);
        assert_eq!(config.num_games, 10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_heuristic_weights_alias() {
        let config: AgentConfig =
            serde_json::from_str(r#"{ "heuristic_weights": { "merge": 7.5 } }"#).unwrap();
        assert_eq!(config.weights.merge, 7.5);
    }

    #[test]
    fn test_seed_round_trips_as_hex() {
        let config = AgentConfig {
            seed: Some(GameSeed::from([0xab; 16])),
            ..AgentConfig::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["seed"], "ab".repeat(16));
        let back: AgentConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let result = serde_json::from_str::<AgentConfig>(r#"{ "algorithm": "mcts" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_names_the_field() {
        let cases = [
            (
                AgentConfig {
                    depth: 0,
                    ..AgentConfig::default()
                },
                "depth",
            ),
            (
                AgentConfig {
                    min_depth: 0,
                    ..AgentConfig::default()
                },
                "min_depth",
            ),
            (
                AgentConfig {
                    min_depth: 5,
                    max_depth: 3,
                    ..AgentConfig::default()
                },
                "max_depth",
            ),
            (
                AgentConfig {
                    num_games: 0,
                    ..AgentConfig::default()
                },
                "num_games",
            ),
        ];
        for (config, field) in cases {
            let message = config.validate().unwrap_err().to_string();
            assert!(message.starts_with(field), "{message}");
        }

        let mut config = AgentConfig::default();
        config.weights.smoothness = f64::NAN;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Weight { name: "smoothness" })
        );
    }

    #[test]
    fn test_session_runner_uses_config() {
        let config = AgentConfig {
            algorithm: SearchAlgorithm::Minimax,
            depth: 2,
            ..AgentConfig::default()
        };
        let runner = config.session_runner();
        assert_eq!(runner.engine().algorithm(), SearchAlgorithm::Minimax);
        assert_eq!(runner.depth_policy(), DepthPolicy::Fixed(2));
    }
}
