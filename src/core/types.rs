//! Core type definitions for KNN

use crate::core::{KnnError, Result};
use crate::metric::Metric;
use serde::{Deserialize, Serialize};

/// Zero-based class identifier
pub type Label = usize;

/// Labeled feature vector
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Dense feature vector
    pub features: Vec<f64>,
    /// Zero-based class label
    pub label: Label,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: Vec<f64>, label: Label) -> Self {
        Self { features, label }
    }

    /// Number of features
    pub fn dim(&self) -> usize {
        self.features.len()
    }
}

/// Outcome of a single nearest-neighbor vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    /// Winning label, `None` when no votes were cast (k == 0 or no training data)
    pub label: Option<Label>,
    /// Votes received by the winning label
    pub votes: usize,
    /// Number of neighbors that took part in the vote
    pub neighbors: usize,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: Option<Label>, votes: usize, neighbors: usize) -> Self {
        Self {
            label,
            votes,
            neighbors,
        }
    }

    /// Prediction with no majority label
    pub fn ambiguous() -> Self {
        Self::new(None, 0, 0)
    }

    /// Whether a label could be determined
    pub fn is_ambiguous(&self) -> bool {
        self.label.is_none()
    }

    /// Share of neighbors that voted for the winning label, in [0, 1]
    pub fn confidence(&self) -> f64 {
        if self.neighbors == 0 {
            0.0
        } else {
            self.votes as f64 / self.neighbors as f64
        }
    }
}

/// Accuracy observed at a given neighbor count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyPoint {
    pub k: usize,
    /// Percentage in [0, 100]
    pub accuracy: f64,
}

impl AccuracyPoint {
    pub fn new(k: usize, accuracy: f64) -> Self {
        Self { k, accuracy }
    }
}

/// Configuration for a single classification run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnnConfig {
    /// Number of neighbors taking part in the vote
    pub k: usize,
    /// Distance used to rank neighbors
    pub metric: Metric,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            k: 10,
            metric: Metric::Euclidean,
        }
    }
}

/// Check that samples form a usable dataset and return their shared dimensionality
///
/// Fails on an empty slice, on samples without features, and on feature
/// vectors whose length differs from the first sample's.
pub fn validate_samples(samples: &[Sample]) -> Result<usize> {
    let first = samples.first().ok_or(KnnError::EmptyDataset)?;
    let dim = first.dim();

    if dim == 0 {
        return Err(KnnError::InvalidDataset(
            "samples must have at least one feature".to_string(),
        ));
    }

    for sample in samples {
        if sample.dim() != dim {
            return Err(KnnError::DimensionMismatch {
                expected: dim,
                actual: sample.dim(),
            });
        }
    }

    Ok(dim)
}

/// Largest label in the samples, if any
pub fn max_label(samples: &[Sample]) -> Option<Label> {
    samples.iter().map(|s| s.label).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample() {
        let sample = Sample::new(vec![1.0, 3.0], 2);
        assert_eq!(sample.label, 2);
        assert_eq!(sample.dim(), 2);
    }

    #[test]
    fn test_prediction_confidence() {
        let pred = Prediction::new(Some(1), 3, 4);
        assert_eq!(pred.confidence(), 0.75);
        assert!(!pred.is_ambiguous());

        let none = Prediction::ambiguous();
        assert!(none.is_ambiguous());
        assert_eq!(none.confidence(), 0.0);
    }

    #[test]
    fn test_knn_config_default() {
        let config = KnnConfig::default();
        assert_eq!(config.k, 10);
        assert_eq!(config.metric, Metric::Euclidean);
    }

    #[test]
    fn test_validate_samples() {
        let samples = vec![Sample::new(vec![0.0, 1.0], 0), Sample::new(vec![2.0, 3.0], 1)];
        assert_eq!(validate_samples(&samples).unwrap(), 2);
    }

    #[test]
    fn test_validate_samples_faults() {
        assert!(matches!(validate_samples(&[]), Err(KnnError::EmptyDataset)));

        let empty_features = vec![Sample::new(vec![], 0)];
        assert!(matches!(
            validate_samples(&empty_features),
            Err(KnnError::InvalidDataset(_))
        ));

        let ragged = vec![Sample::new(vec![0.0, 1.0], 0), Sample::new(vec![2.0], 1)];
        assert!(matches!(
            validate_samples(&ragged),
            Err(KnnError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_max_label() {
        let samples = vec![Sample::new(vec![0.0], 3), Sample::new(vec![1.0], 1)];
        assert_eq!(max_label(&samples), Some(3));
        assert_eq!(max_label(&[]), None);
    }
}
