//! Static evaluation of a board: the leaf value of every search.

use std::fmt;

use tilewise_engine::Board;

use crate::{
    board_analysis::BoardAnalysis,
    board_feature::{BoardFeature as _, BoxedBoardFeature, all_board_features},
    weights::HeuristicWeights,
};

/// Scores a board; higher is better.
///
/// Terminal boards must score [`f64::NEG_INFINITY`] so the search never prefers a lost
/// position over a playable one.
pub trait BoardEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, board: &Board) -> f64;
}

/// One feature's contribution to an evaluation, for diagnostics.
#[derive(Debug, Clone)]
pub struct FeatureContribution {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub weight: f64,
}

impl FeatureContribution {
    #[must_use]
    pub fn weighted(&self) -> f64 {
        self.value * self.weight
    }
}

/// Weighted sum of heuristic features.
///
/// ```
/// use tilewise_engine::Board;
/// use tilewise_evaluator::board_evaluator::{BoardEvaluator as _, FeatureBasedBoardEvaluator};
///
/// let evaluator = FeatureBasedBoardEvaluator::default();
/// let open: Board = "2 . . . / . . . . / . . . . / . . . .".parse().unwrap();
/// let locked: Board = "2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 2".parse().unwrap();
/// assert!(evaluator.evaluate(&open) > 0.0);
/// assert_eq!(evaluator.evaluate(&locked), f64::NEG_INFINITY);
/// ```
#[derive(Debug, Clone)]
pub struct FeatureBasedBoardEvaluator {
    features: Vec<BoxedBoardFeature>,
    weights: Vec<f64>,
}

impl Default for FeatureBasedBoardEvaluator {
    fn default() -> Self {
        Self::from_weights(&HeuristicWeights::default())
    }
}

impl FeatureBasedBoardEvaluator {
    /// # Panics
    ///
    /// Panics if `features.len() != weights.len()`
    #[must_use]
    pub fn new(features: Vec<BoxedBoardFeature>, weights: Vec<f64>) -> Self {
        assert_eq!(features.len(), weights.len());
        Self { features, weights }
    }

    /// Evaluator over every feature, each weighted by its entry in `weights`.
    #[must_use]
    pub fn from_weights(weights: &HeuristicWeights) -> Self {
        let features = all_board_features();
        let weights = features.iter().map(|f| f.weight(weights)).collect();
        Self::new(features, weights)
    }

    /// Per-feature breakdown of [`BoardEvaluator::evaluate`] for a non-terminal board.
    #[must_use]
    pub fn contributions(&self, board: &Board) -> Vec<FeatureContribution> {
        let analysis = BoardAnalysis::from_board(board);
        self.features
            .iter()
            .zip(&self.weights)
            .map(|(feature, &weight)| FeatureContribution {
                id: feature.id().to_owned(),
                name: feature.name().to_owned(),
                value: feature.compute(&analysis),
                weight,
            })
            .collect()
    }
}

impl BoardEvaluator for FeatureBasedBoardEvaluator {
    #[inline]
    fn evaluate(&self, board: &Board) -> f64 {
        let analysis = BoardAnalysis::from_board(board);
        if analysis.is_terminal() {
            return f64::NEG_INFINITY;
        }
        self.features
            .iter()
            .zip(&self.weights)
            .map(|(feature, weight)| feature.compute(&analysis) * weight)
            .sum()
    }
}

/// Evaluates `board` with the default weights.
#[must_use]
pub fn evaluate(board: &Board) -> f64 {
    FeatureBasedBoardEvaluator::default().evaluate(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_board_is_negative_infinity_for_any_weights() {
        let locked = board("2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 2");
        for weights in [
            HeuristicWeights::default(),
            HeuristicWeights {
                empty: 0.0,
                smoothness: 0.0,
                monotonicity: 0.0,
                corner: 0.0,
                merge: 0.0,
                max_tile: 0.0,
            },
            HeuristicWeights {
                empty: -1.0,
                smoothness: -1.0,
                monotonicity: -1.0,
                corner: -1.0,
                merge: -1.0,
                max_tile: -1.0,
            },
        ] {
            let evaluator = FeatureBasedBoardEvaluator::from_weights(&weights);
            assert_eq!(evaluator.evaluate(&locked), f64::NEG_INFINITY);
        }
    }

    #[test]
    fn test_weighted_sum() {
        // empty 14, smoothness 0, monotonicity 1, corner 2*2 (2 at a corner), merge 1, max 2
        let b = board("2 2 . . / . . . . / . . . . / . . . .");
        let evaluator = FeatureBasedBoardEvaluator::default();
        let expected = 14.0 * 1000.0 + 1.0 * 100.0 + 4.0 * 200.0 + 1.0 * 50.0 + 2.0;
        assert!((evaluator.evaluate(&b) - expected).abs() < 1e-9);

        let total = evaluator
            .contributions(&b)
            .iter()
            .map(FeatureContribution::weighted)
            .sum::<f64>();
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_single_feature_weights() {
        let b = board("2 . . . / . . . . / . . . . / . . 4 .");
        let only_empty = FeatureBasedBoardEvaluator::from_weights(&HeuristicWeights {
            empty: 1.0,
            smoothness: 0.0,
            monotonicity: 0.0,
            corner: 0.0,
            merge: 0.0,
            max_tile: 0.0,
        });
        assert_eq!(only_empty.evaluate(&b), 14.0);
    }

    #[test]
    fn test_zero_cells_next_to_tiles_stay_finite() {
        for s in [
            "2 . . . / . . . . / . . . . / . . . .",
            ". 2 . 4 / 8 . 16 . / . 32 . 64 / 128 . 256 .",
            "2 4 8 16 / . . . . / 16 8 4 2 / . . . .",
        ] {
            assert!(evaluate(&board(s)).is_finite(), "{s}");
        }
    }

    #[test]
    fn test_prefers_more_empty_cells() {
        let crowded = board("2 4 8 2 / 4 8 2 4 / . . . . / . . . .");
        let open = board("2 4 . . / . . . . / . . . . / . . . .");
        assert!(evaluate(&open) > evaluate(&crowded));
    }
}
