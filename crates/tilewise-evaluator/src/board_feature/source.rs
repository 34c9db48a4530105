use crate::{
    board_analysis::{BoardAnalysis, TilePlacement},
    weights::HeuristicWeights,
};

use super::{BoardFeature, BoxedBoardFeature};

/// Number of empty cells: room left to manoeuvre.
#[derive(Debug, Clone)]
pub struct EmptyCells;

impl BoardFeature for EmptyCells {
    fn id(&self) -> &'static str {
        "empty"
    }
    fn name(&self) -> &'static str {
        "Empty Cells"
    }
    fn clone_boxed(&self) -> BoxedBoardFeature {
        Box::new(self.clone())
    }
    fn weight(&self, weights: &HeuristicWeights) -> f64 {
        weights.empty
    }
    fn compute(&self, analysis: &BoardAnalysis) -> f64 {
        f64::from(analysis.empty_cells())
    }
}

/// Negated log2 distance between neighbouring tiles.
///
/// Neighbours of similar magnitude merge sooner, so a smoother board scores closer to zero.
/// Empty cells do not take part.
#[derive(Debug, Clone)]
pub struct Smoothness;

impl BoardFeature for Smoothness {
    fn id(&self) -> &'static str {
        "smoothness"
    }
    fn name(&self) -> &'static str {
        "Smoothness"
    }
    fn clone_boxed(&self) -> BoxedBoardFeature {
        Box::new(self.clone())
    }
    fn weight(&self, weights: &HeuristicWeights) -> f64 {
        weights.smoothness
    }
    fn compute(&self, analysis: &BoardAnalysis) -> f64 {
        -f64::from(analysis.roughness())
    }
}

/// How consistently tiles grow along each row and column.
///
/// See [`BoardAnalysis::monotonicity`].
#[derive(Debug, Clone)]
pub struct Monotonicity;

impl BoardFeature for Monotonicity {
    fn id(&self) -> &'static str {
        "monotonicity"
    }
    fn name(&self) -> &'static str {
        "Monotonicity"
    }
    fn clone_boxed(&self) -> BoxedBoardFeature {
        Box::new(self.clone())
    }
    fn weight(&self, weights: &HeuristicWeights) -> f64 {
        weights.monotonicity
    }
    fn compute(&self, analysis: &BoardAnalysis) -> f64 {
        f64::from(analysis.monotonicity())
    }
}

/// Bonus for keeping the largest tile anchored.
///
/// Twice the largest tile when it sits in a corner, half of it on an edge, nothing inside.
#[derive(Debug, Clone)]
pub struct MaxTileCorner;

impl BoardFeature for MaxTileCorner {
    fn id(&self) -> &'static str {
        "corner"
    }
    fn name(&self) -> &'static str {
        "Max Tile Corner"
    }
    fn clone_boxed(&self) -> BoxedBoardFeature {
        Box::new(self.clone())
    }
    fn weight(&self, weights: &HeuristicWeights) -> f64 {
        weights.corner
    }
    fn compute(&self, analysis: &BoardAnalysis) -> f64 {
        let max = f64::from(analysis.max_tile());
        match analysis.max_tile_placement() {
            Some(TilePlacement::Corner) => max * 2.0,
            Some(TilePlacement::Edge) => max * 0.5,
            Some(TilePlacement::Inner) | None => 0.0,
        }
    }
}

/// Adjacent equal pairs: merges available on the next move.
#[derive(Debug, Clone)]
pub struct MergePotential;

impl BoardFeature for MergePotential {
    fn id(&self) -> &'static str {
        "merge"
    }
    fn name(&self) -> &'static str {
        "Merge Potential"
    }
    fn clone_boxed(&self) -> BoxedBoardFeature {
        Box::new(self.clone())
    }
    fn weight(&self, weights: &HeuristicWeights) -> f64 {
        weights.merge
    }
    fn compute(&self, analysis: &BoardAnalysis) -> f64 {
        f64::from(analysis.merge_pairs())
    }
}

#[derive(Debug, Clone)]
pub struct MaxTile;

impl BoardFeature for MaxTile {
    fn id(&self) -> &'static str {
        "max_tile"
    }
    fn name(&self) -> &'static str {
        "Max Tile"
    }
    fn clone_boxed(&self) -> BoxedBoardFeature {
        Box::new(self.clone())
    }
    fn weight(&self, weights: &HeuristicWeights) -> f64 {
        weights.max_tile
    }
    fn compute(&self, analysis: &BoardAnalysis) -> f64 {
        f64::from(analysis.max_tile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(s: &str) -> BoardAnalysis {
        BoardAnalysis::from_board(&s.parse().unwrap())
    }

    #[test]
    fn test_corner_bonus() {
        let corner = analyze("128 . . . / . . . . / . . . . / . . . 2");
        assert_eq!(MaxTileCorner.compute(&corner), 256.0);

        let edge = analyze(". . . . / . . . 128 / . . . . / . . . 2");
        assert_eq!(MaxTileCorner.compute(&edge), 64.0);

        let inner = analyze(". . . . / . . 128 . / . . . . / . . . 2");
        assert_eq!(MaxTileCorner.compute(&inner), 0.0);
    }

    #[test]
    fn test_smoothness_is_never_positive() {
        let analysis = analyze("2 1024 . . / . 2 . . / . . . . / . . . .");
        let value = Smoothness.compute(&analysis);
        assert!(value.is_finite());
        assert_eq!(value, -18.0);

        let flat = analyze("4 4 . . / 4 4 . . / . . . . / . . . .");
        assert_eq!(Smoothness.compute(&flat), 0.0);
    }

    #[test]
    fn test_counts_become_feature_values() {
        let analysis = analyze("2 2 . . / . . . . / . . . . / . . . .");
        assert_eq!(EmptyCells.compute(&analysis), 14.0);
        assert_eq!(MergePotential.compute(&analysis), 1.0);
        assert_eq!(MaxTile.compute(&analysis), 2.0);
        assert_eq!(Monotonicity.compute(&analysis), 1.0);
    }
}
