//! k-nearest-neighbor classification
//!
//! Classification is instance-based: there is no fitting step, every query
//! is ranked against the full training set.
//!
//! 1. The distance from the query to every training sample is computed.
//! 2. The (distance, label) pairs are sorted ascending with a stable sort,
//!    so equally distant samples keep their input order.
//! 3. The first `k` pairs vote; the label with the most votes wins and ties
//!    go to the lowest label id.

use crate::core::{validate_samples, KnnError, Label, Prediction, Result, Sample};
use crate::metric::Distance;
use log::debug;
use std::collections::BTreeMap;

/// A training sample ranked against a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub distance: f64,
    pub label: Label,
}

/// Rank the training set against `query` and keep the `k` closest samples
///
/// When `k` exceeds the training set size every sample is returned.
pub fn nearest_neighbors<D: Distance + ?Sized>(
    training: &[Sample],
    query: &[f64],
    k: usize,
    metric: &D,
) -> Vec<Neighbor> {
    let mut ranked: Vec<Neighbor> = training
        .iter()
        .map(|sample| Neighbor {
            distance: metric.compute(&sample.features, query),
            label: sample.label,
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(k);
    ranked
}

/// Majority vote over a set of neighbors
///
/// Returns an ambiguous prediction for an empty neighbor set.
pub fn vote(neighbors: &[Neighbor]) -> Prediction {
    let mut tally: BTreeMap<Label, usize> = BTreeMap::new();
    for neighbor in neighbors {
        *tally.entry(neighbor.label).or_insert(0) += 1;
    }

    // Ascending label order; only a strictly larger tally replaces the leader
    let mut winner: Option<(Label, usize)> = None;
    for (&label, &count) in &tally {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((label, count)),
        }
    }

    match winner {
        Some((label, votes)) => Prediction::new(Some(label), votes, neighbors.len()),
        None => Prediction::ambiguous(),
    }
}

/// Predict the label of `query` by majority vote among its `k` nearest training samples
///
/// `k == 0` or an empty training set yields an ambiguous prediction rather
/// than an error. The query must have the training set's dimensionality.
pub fn predict<D: Distance + ?Sized>(
    training: &[Sample],
    query: &[f64],
    k: usize,
    metric: &D,
) -> Prediction {
    if k == 0 || training.is_empty() {
        return Prediction::ambiguous();
    }

    vote(&nearest_neighbors(training, query, k, metric))
}

/// Classifier bound to a validated training set
#[derive(Debug, Clone)]
pub struct KnnClassifier<'a, D: Distance> {
    training: &'a [Sample],
    dim: usize,
    k: usize,
    metric: D,
}

impl<'a, D: Distance> KnnClassifier<'a, D> {
    /// Bind a classifier to a training set
    ///
    /// Fails if the training set is empty, has feature-less samples, or has
    /// ragged feature vectors.
    pub fn new(training: &'a [Sample], k: usize, metric: D) -> Result<Self> {
        let dim = validate_samples(training)?;
        debug!(
            "KNN classifier over {} samples ({} features), k={}, metric={}",
            training.len(),
            dim,
            k,
            metric.name()
        );

        Ok(Self {
            training,
            dim,
            k,
            metric,
        })
    }

    /// Predict the label of a single feature vector
    pub fn predict(&self, query: &[f64]) -> Result<Prediction> {
        self.check_dim(query)?;
        Ok(predict(self.training, query, self.k, &self.metric))
    }

    /// Predict labels for a batch of samples, in input order
    pub fn predict_batch(&self, samples: &[Sample]) -> Result<Vec<Prediction>> {
        samples.iter().map(|s| self.predict(&s.features)).collect()
    }

    /// The `k` closest training samples to `query`
    pub fn neighbors(&self, query: &[f64]) -> Result<Vec<Neighbor>> {
        self.check_dim(query)?;
        Ok(nearest_neighbors(self.training, query, self.k, &self.metric))
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn metric(&self) -> &D {
        &self.metric
    }

    pub fn training(&self) -> &'a [Sample] {
        self.training
    }

    fn check_dim(&self, query: &[f64]) -> Result<()> {
        if query.len() != self.dim {
            return Err(KnnError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }
        Ok(())
    }
}
