//! Manhattan-style distance implementation

use crate::metric::Distance;

/// Rooted Manhattan distance: D(a, b) = sqrt(sum(|a_i - b_i|))
///
/// Unlike the textbook L1 distance, the sum of absolute differences is passed
/// through a square root. Neighbor rankings are identical to plain L1 since
/// the root is monotonic; only reported raw distances differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanDistance;

impl ManhattanDistance {
    /// Create a new Manhattan distance
    pub fn new() -> Self {
        Self
    }
}

impl Distance for ManhattanDistance {
    fn compute(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "feature vectors must have equal length");

        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).abs())
            .sum::<f64>()
            .sqrt()
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}
