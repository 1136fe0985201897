//! Euclidean distance implementation

use crate::metric::Distance;

/// Euclidean distance: D(a, b) = sqrt(sum((a_i - b_i)^2))
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl EuclideanDistance {
    /// Create a new Euclidean distance
    pub fn new() -> Self {
        Self
    }
}

impl Distance for EuclideanDistance {
    fn compute(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "feature vectors must have equal length");

        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}
