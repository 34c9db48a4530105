//! Heuristic features of a board.
//!
//! Each feature reads one metric from a [`BoardAnalysis`] and turns it into a value where
//! larger is better. The evaluator multiplies every feature value by its weight from
//! [`HeuristicWeights`] and sums the products.
//!
//! | id             | value                                                        |
//! |----------------|--------------------------------------------------------------|
//! | `empty`        | number of empty cells                                        |
//! | `monotonicity` | per line, the larger of increasing/decreasing pair counts    |
//! | `smoothness`   | negated sum of log2 differences between adjacent tiles       |
//! | `corner`       | 2 × max tile in a corner, 0.5 × max tile on an edge, else 0  |
//! | `merge`        | number of adjacent equal pairs                               |
//! | `max_tile`     | largest tile value                                           |

use std::fmt;

use crate::{board_analysis::BoardAnalysis, weights::HeuristicWeights};

pub use self::source::*;

mod source;

#[must_use]
pub fn all_board_features() -> Vec<BoxedBoardFeature> {
    vec![
        Box::new(EmptyCells),
        Box::new(Smoothness),
        Box::new(Monotonicity),
        Box::new(MaxTileCorner),
        Box::new(MergePotential),
        Box::new(MaxTile),
    ]
}

pub trait BoardFeature: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn clone_boxed(&self) -> BoxedBoardFeature;

    /// The weight that applies to this feature.
    #[must_use]
    fn weight(&self, weights: &HeuristicWeights) -> f64;

    #[must_use]
    fn compute(&self, analysis: &BoardAnalysis) -> f64;
}

pub type BoxedBoardFeature = Box<dyn BoardFeature>;

impl Clone for BoxedBoardFeature {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl BoardFeature for BoxedBoardFeature {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn clone_boxed(&self) -> BoxedBoardFeature {
        self.as_ref().clone_boxed()
    }

    fn weight(&self, weights: &HeuristicWeights) -> f64 {
        self.as_ref().weight(weights)
    }

    fn compute(&self, analysis: &BoardAnalysis) -> f64 {
        self.as_ref().compute(analysis)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_feature_ids_match_weight_names() {
        let features = all_board_features();
        let ids = features.iter().map(|f| f.id()).collect::<Vec<_>>();
        let names = HeuristicWeights::default()
            .entries()
            .map(|(name, _)| name)
            .to_vec();
        assert_eq!(ids, names);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    }

    #[test]
    fn test_each_feature_reads_its_own_weight() {
        let weights = HeuristicWeights {
            empty: 1.0,
            smoothness: 2.0,
            monotonicity: 3.0,
            corner: 4.0,
            merge: 5.0,
            max_tile: 6.0,
        };
        let read = all_board_features()
            .iter()
            .map(|f| f.weight(&weights))
            .collect::<Vec<_>>();
        assert_eq!(read, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_boxed_clone_keeps_identity() {
        for feature in all_board_features() {
            assert_eq!(feature.clone().id(), feature.id());
        }
    }
}
