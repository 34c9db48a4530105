use serde::{Deserialize, Serialize};

/// Weight applied to each heuristic feature.
///
/// Missing fields take their default when deserialized. Any finite value is a valid weight,
/// including zero (feature disabled) and negative values.
///
/// ```
/// use tilewise_evaluator::weights::HeuristicWeights;
///
/// let weights: HeuristicWeights = serde_json::from_str(r#"{ "empty": 500 }"#).unwrap();
/// assert_eq!(weights.empty, 500.0);
/// assert_eq!(weights.corner, HeuristicWeights::default().corner);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub empty: f64,
    pub smoothness: f64,
    pub monotonicity: f64,
    pub corner: f64,
    pub merge: f64,
    pub max_tile: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            empty: 1000.0,
            smoothness: 50.0,
            monotonicity: 100.0,
            corner: 200.0,
            merge: 50.0,
            max_tile: 1.0,
        }
    }
}

impl HeuristicWeights {
    /// Weights as `(field name, value)` in declaration order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("empty", self.empty),
            ("smoothness", self.smoothness),
            ("monotonicity", self.monotonicity),
            ("corner", self.corner),
            ("merge", self.merge),
            ("max_tile", self.max_tile),
        ]
    }

    /// Name of the first weight that is NaN or infinite.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let weights: HeuristicWeights = serde_json::from_str("{}").unwrap();
        assert_eq!(weights, HeuristicWeights::default());
    }

    #[test]
    fn test_negative_and_zero_weights_are_valid() {
        let weights: HeuristicWeights =
            serde_json::from_str(r#"{ "merge": 0, "corner": -10.5 }"#).unwrap();
        assert_eq!(weights.merge, 0.0);
        assert_eq!(weights.corner, -10.5);
        assert_eq!(weights.first_non_finite(), None);
    }

    #[test]
    fn test_first_non_finite() {
        let weights = HeuristicWeights {
            monotonicity: f64::NAN,
            merge: f64::INFINITY,
            ..HeuristicWeights::default()
        };
        assert_eq!(weights.first_non_finite(), Some("monotonicity"));
    }
}
