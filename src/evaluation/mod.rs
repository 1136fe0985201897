//! Evaluation of a classifier over a labeled test set
//!
//! The confusion matrix is square with one row and one column per class,
//! where the class count is the largest training label plus one. Rows are
//! true labels, columns predicted labels.
//!
//! Degenerate cases are resolved to defined values:
//! - an ambiguous prediction is not written into the matrix but counted
//!   in [`ConfusionMatrix::unclassified`] for its true label;
//! - a row without samples normalizes to all zeros;
//! - accuracy over an empty test set is 0.

use crate::classifier::predict;
use crate::core::{max_label, validate_samples, KnnError, Label, Result, Sample};
use crate::metric::Distance;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Confusion matrix of raw counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// `counts[true_label][predicted_label]`
    pub counts: Vec<Vec<usize>>,
    /// Test samples per true label for which no label could be predicted
    pub unclassified: Vec<usize>,
}

impl ConfusionMatrix {
    /// Create an all-zero matrix for `n_classes` classes
    pub fn new(n_classes: usize) -> Self {
        Self {
            counts: vec![vec![0; n_classes]; n_classes],
            unclassified: vec![0; n_classes],
        }
    }

    /// Number of classes (rows and columns)
    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    /// Record one prediction for a sample of class `actual`
    pub fn record(&mut self, actual: Label, predicted: Option<Label>) -> Result<()> {
        let n_classes = self.n_classes();
        if actual >= n_classes {
            return Err(KnnError::LabelOutOfRange {
                label: actual,
                n_classes,
            });
        }

        match predicted {
            Some(p) if p < n_classes => self.counts[actual][p] += 1,
            _ => self.unclassified[actual] += 1,
        }
        Ok(())
    }

    /// Count for a (true, predicted) pair
    pub fn get(&self, actual: Label, predicted: Label) -> usize {
        self.counts[actual][predicted]
    }

    /// Sum of a row, i.e. classified samples with that true label
    pub fn row_sum(&self, actual: Label) -> usize {
        self.counts[actual].iter().sum()
    }

    /// Sum of all cells
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Samples that landed on the diagonal
    pub fn correct(&self) -> usize {
        (0..self.n_classes()).map(|i| self.counts[i][i]).sum()
    }

    /// Samples without a prediction
    pub fn total_unclassified(&self) -> usize {
        self.unclassified.iter().sum()
    }

    /// Percentage of correct predictions over every recorded sample
    ///
    /// Unclassified samples count as incorrect. An empty matrix has accuracy 0.
    pub fn accuracy(&self) -> f64 {
        let total = self.total() + self.total_unclassified();
        if total == 0 {
            0.0
        } else {
            100.0 * self.correct() as f64 / total as f64
        }
    }

    /// Row-normalized percentages; empty rows become all zeros
    pub fn percentages(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let sum: usize = row.iter().sum();
                if sum == 0 {
                    vec![0.0; row.len()]
                } else {
                    row.iter()
                        .map(|&x| x as f64 / sum as f64 * 100.0)
                        .collect()
                }
            })
            .collect()
    }
}

/// Accuracy together with both confusion matrix views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub k: usize,
    pub accuracy: f64,
    pub counts: ConfusionMatrix,
    pub percentages: Vec<Vec<f64>>,
}

/// Validate training and testing sets against each other
///
/// Training must be a non-empty, well-formed dataset. Testing may be empty,
/// but otherwise must share the training dimensionality and only carry
/// labels known to training. Returns the class count.
fn validate_split(training: &[Sample], testing: &[Sample]) -> Result<usize> {
    let dim = validate_samples(training)?;

    if let Some(bad) = testing.iter().find(|s| s.dim() != dim) {
        return Err(KnnError::DimensionMismatch {
            expected: dim,
            actual: bad.dim(),
        });
    }

    let n_classes = max_label(training).map_or(0, |l| l + 1);
    if let Some(bad) = testing.iter().find(|s| s.label >= n_classes) {
        return Err(KnnError::LabelOutOfRange {
            label: bad.label,
            n_classes,
        });
    }

    Ok(n_classes)
}

/// Classify every test sample and tabulate true versus predicted labels
pub fn confusion_counts<D: Distance + ?Sized>(
    training: &[Sample],
    testing: &[Sample],
    k: usize,
    metric: &D,
) -> Result<ConfusionMatrix> {
    let n_classes = validate_split(training, testing)?;
    debug!(
        "Confusion matrix: {} classes, {} test samples, k={}, metric={}",
        n_classes,
        testing.len(),
        k,
        metric.name()
    );

    let mut matrix = ConfusionMatrix::new(n_classes);
    for sample in testing {
        let prediction = predict(training, &sample.features, k, metric);
        matrix.record(sample.label, prediction.label)?;
    }

    let unclassified = matrix.total_unclassified();
    if unclassified > 0 {
        warn!("{unclassified} test samples could not be classified (k={k})");
    }

    Ok(matrix)
}

/// Row-normalized confusion matrix in percent
pub fn confusion_percentages<D: Distance + ?Sized>(
    training: &[Sample],
    testing: &[Sample],
    k: usize,
    metric: &D,
) -> Result<Vec<Vec<f64>>> {
    Ok(confusion_counts(training, testing, k, metric)?.percentages())
}

/// Percentage of test samples whose predicted label equals the true label
pub fn accuracy<D: Distance + ?Sized>(
    training: &[Sample],
    testing: &[Sample],
    k: usize,
    metric: &D,
) -> Result<f64> {
    validate_split(training, testing)?;

    if testing.is_empty() {
        warn!("Accuracy requested for an empty test set, reporting 0%");
        return Ok(0.0);
    }

    let correct = testing
        .iter()
        .filter(|s| predict(training, &s.features, k, metric).label == Some(s.label))
        .count();

    Ok(100.0 * correct as f64 / testing.len() as f64)
}

/// Accuracy and confusion matrices from a single pass over the test set
pub fn evaluate<D: Distance + ?Sized>(
    training: &[Sample],
    testing: &[Sample],
    k: usize,
    metric: &D,
) -> Result<Evaluation> {
    let counts = confusion_counts(training, testing, k, metric)?;
    if testing.is_empty() {
        warn!("Evaluating on an empty test set, reporting 0%");
    }

    Ok(Evaluation {
        k,
        accuracy: counts.accuracy(),
        percentages: counts.percentages(),
        counts,
    })
}
