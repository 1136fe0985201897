//! Distance metrics for nearest-neighbor search

pub mod euclidean;
pub mod manhattan;
pub mod traits;

pub use self::euclidean::*;
pub use self::manhattan::*;
pub use self::traits::*;

use crate::core::{KnnError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in metrics, dispatched statically through [`Distance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Euclidean,
    Manhattan,
}

impl Metric {
    /// Every built-in metric, in reporting order
    pub const ALL: [Metric; 2] = [Metric::Euclidean, Metric::Manhattan];

    /// Distance between two equal-length feature vectors
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self.compute(a, b)
    }
}

impl Distance for Metric {
    fn compute(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Metric::Euclidean => EuclideanDistance.compute(a, b),
            Metric::Manhattan => ManhattanDistance.compute(a, b),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Metric::Euclidean => EuclideanDistance.name(),
            Metric::Manhattan => ManhattanDistance.name(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = KnnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "manhattan" => Ok(Metric::Manhattan),
            other => Err(KnnError::InvalidParameter(format!(
                "Unknown metric: {other}. Use 'euclidean' or 'manhattan'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_dispatch() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0];

        assert_eq!(Metric::Euclidean.distance(&a, &b), 5.0);
        assert_eq!(Metric::Manhattan.distance(&a, &b), 7.0_f64.sqrt());
    }

    #[test]
    fn test_identical_vectors_have_zero_distance() {
        let a = [0.25, -3.0, 8.0, 1e-3];
        for metric in Metric::ALL {
            assert_eq!(metric.distance(&a, &a), 0.0, "{metric}");
        }
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("Manhattan".parse::<Metric>().unwrap(), Metric::Manhattan);
        assert!(matches!(
            "cosine".parse::<Metric>(),
            Err(KnnError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(Metric::Euclidean.to_string(), "euclidean");
        assert_eq!(Metric::Manhattan.to_string(), "manhattan");
    }

    #[test]
    fn test_metric_as_trait_object() {
        let metrics: Vec<Box<dyn Distance>> =
            vec![Box::new(EuclideanDistance::new()), Box::new(Metric::Manhattan)];
        let names: Vec<_> = metrics.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["euclidean", "manhattan"]);
    }
}
