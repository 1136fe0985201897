//! High-level API for k-nearest-neighbor evaluation
//!
//! This module provides a user-friendly interface for common KNN tasks,
//! including prediction, evaluation and parameter sweeps.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rknn::api::KNN;
//! use rknn::{GestureDataset, Metric};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let training = GestureDataset::from_file("training.dat")?;
//! let testing = GestureDataset::from_file("testing.dat")?;
//!
//! let knn = KNN::new()
//!     .with_k(10)
//!     .with_metric(Metric::Manhattan)
//!     .fit(&training)?;
//!
//! let evaluation = knn.evaluate(&testing)?;
//! println!("Accuracy: {:.2}%", evaluation.accuracy);
//! # Ok(())
//! # }
//! ```

use crate::classifier::KnnClassifier;
use crate::core::{Dataset, KnnConfig, Prediction, Result, Sample};
use crate::data::GestureDataset;
use crate::evaluation::{self, Evaluation};
use crate::metric::Metric;
use std::path::Path;

/// High-level KNN interface with builder pattern
#[derive(Debug, Clone, Default)]
pub struct KNN {
    config: KnnConfig,
}

impl KNN {
    /// Create a new KNN with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing configuration
    pub fn with_config(config: KnnConfig) -> Self {
        Self { config }
    }

    /// Set the number of voting neighbors
    pub fn with_k(mut self, k: usize) -> Self {
        self.config.k = k;
        self
    }

    /// Set the distance metric
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.config.metric = metric;
        self
    }

    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    /// Bind to a training set
    ///
    /// Nothing is learned; the training set is validated and borrowed.
    pub fn fit<'a, D: Dataset + ?Sized>(&self, training: &'a D) -> Result<FittedKnn<'a>> {
        let classifier =
            KnnClassifier::new(training.samples(), self.config.k, self.config.metric)?;
        Ok(FittedKnn { classifier })
    }
}

/// KNN bound to a validated training set
pub struct FittedKnn<'a> {
    classifier: KnnClassifier<'a, Metric>,
}

impl FittedKnn<'_> {
    /// Predict a single feature vector
    pub fn predict(&self, features: &[f64]) -> Result<Prediction> {
        self.classifier.predict(features)
    }

    /// Predict multiple samples
    pub fn predict_batch(&self, samples: &[Sample]) -> Result<Vec<Prediction>> {
        self.classifier.predict_batch(samples)
    }

    /// Predict every sample of a dataset
    pub fn predict_dataset<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<Vec<Prediction>> {
        self.predict_batch(dataset.samples())
    }

    /// Accuracy percentage on a test set
    pub fn accuracy<D: Dataset + ?Sized>(&self, testing: &D) -> Result<f64> {
        evaluation::accuracy(
            self.classifier.training(),
            testing.samples(),
            self.classifier.k(),
            self.classifier.metric(),
        )
    }

    /// Accuracy and confusion matrices on a test set
    pub fn evaluate<D: Dataset + ?Sized>(&self, testing: &D) -> Result<Evaluation> {
        evaluation::evaluate(
            self.classifier.training(),
            testing.samples(),
            self.classifier.k(),
            self.classifier.metric(),
        )
    }

    pub fn k(&self) -> usize {
        self.classifier.k()
    }

    pub fn metric(&self) -> Metric {
        *self.classifier.metric()
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;
    use crate::report::{EvaluationReport, SweepReport};
    use crate::sweep::SweepConfig;

    /// Load a training and a testing file
    pub fn load_split<P1: AsRef<Path>, P2: AsRef<Path>>(
        train_path: P1,
        test_path: P2,
    ) -> Result<(GestureDataset, GestureDataset)> {
        let training = GestureDataset::from_file(train_path)?;
        let testing = GestureDataset::from_file(test_path)?;
        Ok((training, testing))
    }

    /// Quick evaluation: classify the test file against the training file
    pub fn evaluate_split<P1: AsRef<Path>, P2: AsRef<Path>>(
        train_path: P1,
        test_path: P2,
        k: usize,
        metric: Metric,
    ) -> Result<Evaluation> {
        let (training, testing) = load_split(train_path, test_path)?;
        KNN::new()
            .with_k(k)
            .with_metric(metric)
            .fit(&training)?
            .evaluate(&testing)
    }

    /// Accuracy per metric at `headline_k`, confusion matrices at `matrix_k`
    pub fn evaluation_report<P1: AsRef<Path>, P2: AsRef<Path>>(
        train_path: P1,
        test_path: P2,
        headline_k: usize,
        matrix_k: usize,
        metrics: &[Metric],
    ) -> Result<EvaluationReport> {
        let (training, testing) = load_split(train_path, test_path)?;
        EvaluationReport::compute(
            training.samples(),
            testing.samples(),
            headline_k,
            matrix_k,
            metrics,
        )
    }

    /// Sweep k and metrics over a training/testing file pair
    pub fn sweep_files<P1: AsRef<Path>, P2: AsRef<Path>>(
        train_path: P1,
        test_path: P2,
        config: &SweepConfig,
    ) -> Result<SweepReport> {
        let (training, testing) = load_split(train_path, test_path)?;
        SweepReport::compute(training.samples(), testing.samples(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KnnError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(vec![0.0, 0.0], 0),
            Sample::new(vec![0.4, 0.2], 0),
            Sample::new(vec![8.0, 8.0], 1),
            Sample::new(vec![8.3, 7.9], 1),
        ]
    }

    #[test]
    fn test_knn_builder_pattern() {
        let knn = KNN::new().with_k(7).with_metric(Metric::Manhattan);

        assert_eq!(knn.config().k, 7);
        assert_eq!(knn.config().metric, Metric::Manhattan);
        assert_eq!(KNN::new().config().k, 10);

        let config = KnnConfig {
            k: 3,
            metric: Metric::Manhattan,
        };
        assert_eq!(KNN::with_config(config).config(), &config);
    }

    #[test]
    fn test_fit_and_predict() {
        let training = samples();
        let knn = KNN::new().with_k(1).fit(&training).unwrap();

        assert_eq!(knn.predict(&[0.1, 0.1]).unwrap().label, Some(0));
        assert_eq!(knn.predict(&[7.5, 8.5]).unwrap().label, Some(1));
        assert_eq!(knn.k(), 1);
        assert_eq!(knn.metric(), Metric::Euclidean);
    }

    #[test]
    fn test_fit_rejects_empty_training() {
        let training: Vec<Sample> = Vec::new();
        assert!(matches!(
            KNN::new().fit(&training),
            Err(KnnError::EmptyDataset)
        ));
    }

    #[test]
    fn test_evaluate() {
        let training = samples();
        let testing = vec![
            Sample::new(vec![0.2, 0.1], 0),
            Sample::new(vec![7.9, 8.1], 1),
        ];
        let knn = KNN::new().with_k(3).fit(&training).unwrap();

        let evaluation = knn.evaluate(&testing).unwrap();
        assert_eq!(evaluation.accuracy, 100.0);
        assert_eq!(evaluation.counts.counts, vec![vec![1, 0], vec![0, 1]]);
        assert_eq!(knn.accuracy(&testing).unwrap(), 100.0);
        assert_eq!(knn.predict_dataset(&testing).unwrap().len(), 2);
    }

    #[test]
    fn test_quick_evaluate_split() {
        let mut train_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(train_file, "1 0.0 0.0").expect("Failed to write");
        writeln!(train_file, "1 0.2 0.1").expect("Failed to write");
        writeln!(train_file, "2 5.0 5.0").expect("Failed to write");
        writeln!(train_file, "2 5.1 4.9").expect("Failed to write");
        train_file.flush().expect("Failed to flush");

        let mut test_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(test_file, "1 0.1 0.1").expect("Failed to write");
        writeln!(test_file, "2 4.8 5.2").expect("Failed to write");
        test_file.flush().expect("Failed to flush");

        let evaluation =
            quick::evaluate_split(train_file.path(), test_file.path(), 1, Metric::Euclidean)
                .expect("Evaluation should succeed");
        assert_eq!(evaluation.accuracy, 100.0);

        let report = quick::sweep_files(
            train_file.path(),
            test_file.path(),
            &crate::sweep::SweepConfig::default(),
        )
        .expect("Sweep should succeed");
        assert_eq!(report.outcome.extremes.len(), 2);
    }
}
