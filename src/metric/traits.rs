//! Distance trait definition

/// Distance function trait
///
/// A distance D(a, b) is a non-negative dissimilarity between two feature
/// vectors of identical length. Nearest-neighbor search only relies on the
/// relative order it induces, not on its absolute scale.
pub trait Distance: Send + Sync {
    /// Compute distance D(a, b)
    ///
    /// `a` and `b` must have the same length; callers validate this for
    /// whole datasets up front.
    fn compute(&self, a: &[f64], b: &[f64]) -> f64;

    /// Human-readable metric name
    fn name(&self) -> &'static str;
}
