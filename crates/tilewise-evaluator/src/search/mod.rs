//! Depth-bounded game-tree search over alternating agent and spawn nodes.
//!
//! Every search call builds its tree from scratch and discards it on return; nothing is
//! cached between calls. A node entered with a remaining depth of zero, or holding a terminal
//! board, is a leaf scored by the [`BoardEvaluator`]. Otherwise:
//!
//! - a **max node** (agent to move) tries each legal direction in [`Direction::ALL`] order and
//!   keeps the first direction reaching the highest value;
//! - a **chance node** (tile spawn) averages its children with the probabilities of
//!   [`spawn_distribution`] under [`SearchAlgorithm::Expectimax`], or takes the worst child
//!   under [`SearchAlgorithm::Minimax`] and [`SearchAlgorithm::AlphaBeta`].
//!
//! Both node kinds consume one unit of depth. Alpha-beta prunes the minimax tree and always
//! picks the same direction as plain minimax.
//!
//! ```
//! use tilewise_engine::Board;
//! use tilewise_evaluator::search::{SearchAlgorithm, best_move};
//!
//! let board: Board = "2 2 . . / . . . . / . . . . / . . . .".parse().unwrap();
//! assert!(best_move(&board, SearchAlgorithm::Expectimax, 2).is_some());
//!
//! let locked: Board = "2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 2".parse().unwrap();
//! assert_eq!(best_move(&locked, SearchAlgorithm::AlphaBeta, 3), None);
//! ```
//!
//! [`spawn_distribution`]: tilewise_engine::spawn_distribution

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tilewise_engine::{Board, Direction};

use crate::board_evaluator::{BoardEvaluator, FeatureBasedBoardEvaluator};

use self::tree::TreeSearch;

mod tree;

/// How spawn nodes are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    /// Probability-weighted average over spawn outcomes.
    #[default]
    Expectimax,
    /// Worst spawn outcome, as if an adversary placed the tile.
    Minimax,
    /// Minimax with alpha-beta pruning.
    #[serde(alias = "alpha_beta", alias = "alpha-beta")]
    AlphaBeta,
}

impl SearchAlgorithm {
    pub const ALL: [Self; 3] = [Self::Expectimax, Self::Minimax, Self::AlphaBeta];
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Expectimax => "expectimax",
            Self::Minimax => "minimax",
            Self::AlphaBeta => "alphabeta",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown search algorithm {name:?} (expected expectimax, minimax or alphabeta)")]
pub struct ParseAlgorithmError {
    name: String,
}

impl FromStr for SearchAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expectimax" => Ok(Self::Expectimax),
            "minimax" => Ok(Self::Minimax),
            "alphabeta" | "alpha_beta" | "alpha-beta" => Ok(Self::AlphaBeta),
            _ => Err(ParseAlgorithmError { name: s.to_owned() }),
        }
    }
}

/// Work done by one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, leaves included.
    pub nodes: u64,
    /// Branches skipped by alpha-beta pruning.
    pub cutoffs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// `None` when the board has no legal move.
    pub direction: Option<Direction>,
    pub value: f64,
    pub stats: SearchStats,
}

/// Value of moving in one direction from the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchValue {
    pub direction: Direction,
    pub value: f64,
    pub legal: bool,
}

/// Chooses moves by searching the game tree with a fixed algorithm and evaluator.
#[derive(Debug)]
pub struct SearchEngine<'a> {
    algorithm: SearchAlgorithm,
    evaluator: Box<dyn BoardEvaluator + 'a>,
}

impl<'a> SearchEngine<'a> {
    #[must_use]
    pub fn new(algorithm: SearchAlgorithm, evaluator: Box<dyn BoardEvaluator + 'a>) -> Self {
        Self {
            algorithm,
            evaluator,
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub fn evaluator(&self) -> &dyn BoardEvaluator {
        self.evaluator.as_ref()
    }

    /// Searches `depth` plies below `board`.
    ///
    /// A depth of 0 is treated as 1, so a playable board always yields a direction.
    #[must_use]
    pub fn search(&self, board: &Board, depth: usize) -> SearchResult {
        let depth = depth.max(1);
        let mut tree = TreeSearch::new(self.evaluator.as_ref());
        let (value, direction) = match self.algorithm {
            SearchAlgorithm::Expectimax => tree.expectimax_max(board, depth),
            SearchAlgorithm::Minimax => tree.minimax_max(board, depth),
            SearchAlgorithm::AlphaBeta => {
                tree.alpha_beta_max(board, depth, f64::NEG_INFINITY, f64::INFINITY)
            }
        };
        let stats = tree.stats();
        log::debug!(
            "{} depth {depth}: {} (value {value:.1}, {} nodes, {} cutoffs)",
            self.algorithm,
            direction.map_or_else(|| "no move".to_owned(), |d| d.to_string()),
            stats.nodes,
            stats.cutoffs,
        );
        SearchResult {
            direction,
            value,
            stats,
        }
    }

    /// Value of each direction in [`Direction::ALL`] order.
    ///
    /// Illegal directions are reported with `legal == false` and a value of
    /// [`f64::NEG_INFINITY`]. Alpha-beta branches are searched with a full window, so their
    /// values equal the minimax values.
    #[must_use]
    pub fn branch_values(&self, board: &Board, depth: usize) -> [BranchValue; Direction::LEN] {
        let depth = depth.max(1);
        let mut tree = TreeSearch::new(self.evaluator.as_ref());
        Direction::ALL.map(|direction| {
            let result = board.apply(direction);
            if !result.changed {
                return BranchValue {
                    direction,
                    value: f64::NEG_INFINITY,
                    legal: false,
                };
            }
            let child = &result.board;
            let value = match self.algorithm {
                SearchAlgorithm::Expectimax => tree.expectimax_chance(child, depth - 1),
                SearchAlgorithm::Minimax => tree.minimax_min(child, depth - 1),
                SearchAlgorithm::AlphaBeta => {
                    tree.alpha_beta_min(child, depth - 1, f64::NEG_INFINITY, f64::INFINITY)
                }
            };
            BranchValue {
                direction,
                value,
                legal: true,
            }
        })
    }
}

/// Recommended move for `board`, using the default heuristic weights.
///
/// Returns `None` when the board has no legal move.
#[must_use]
pub fn best_move(board: &Board, algorithm: SearchAlgorithm, depth: usize) -> Option<Direction> {
    SearchEngine::new(algorithm, Box::new(FeatureBasedBoardEvaluator::default()))
        .search(board, depth)
        .direction
}
