//! Move selection for the 4×4 sliding-tile game.
//!
//! The crate is layered bottom-up:
//!
//! 1. [`board_analysis`] computes board metrics lazily (empty cells, monotonicity, ...).
//! 2. [`board_feature`] turns metrics into heuristic features, weighted by
//!    [`weights::HeuristicWeights`].
//! 3. [`board_evaluator`] sums weighted features into a static score, `-inf` for a lost board.
//! 4. [`search`] looks ahead with expectimax, minimax or alpha-beta and picks a direction.
//! 5. [`depth_policy`] and [`session_runner`] drive the search through whole games, a
//!    batch spread over a pool of scoped worker threads.
//!
//! # Example
//!
//! ```
//! use tilewise_engine::{GameSeed, GameSession};
//! use tilewise_evaluator::{
//!     board_evaluator::FeatureBasedBoardEvaluator,
//!     depth_policy::DepthPolicy,
//!     search::{SearchAlgorithm, SearchEngine},
//!     session_runner::SessionRunner,
//!     weights::HeuristicWeights,
//! };
//!
//! let evaluator = FeatureBasedBoardEvaluator::from_weights(&HeuristicWeights::default());
//! let engine = SearchEngine::new(SearchAlgorithm::Expectimax, Box::new(evaluator));
//! let runner = SessionRunner::new(engine, DepthPolicy::Fixed(1));
//!
//! let mut session = GameSession::with_seed(GameSeed::from([0; 16]));
//! let result = runner.play(&mut session, 10);
//! assert_eq!(result.moves, 10);
//! ```

pub mod board_analysis;
pub mod board_evaluator;
pub mod board_feature;
pub mod depth_policy;
pub mod search;
pub mod session_runner;
pub mod weights;
