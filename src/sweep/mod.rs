//! Parameter sweep over neighbor counts and metrics
//!
//! Accuracy is measured for every (metric, k) pair, then the best and worst
//! k per metric are picked by a linear scan in ascending-k order, so the
//! first of several equal accuracies wins. The count confusion matrix is
//! recomputed at each picked k.

use crate::core::{AccuracyPoint, KnnError, Result, Sample};
use crate::evaluation::{accuracy, confusion_counts, ConfusionMatrix};
use crate::metric::Metric;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Inclusive range of neighbor counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KRange {
    start: usize,
    end: usize,
    step: usize,
}

impl KRange {
    /// Create a range `start..=end` advancing by `step`
    ///
    /// Every value must be odd, so `start` has to be odd and `step` even.
    pub fn new(start: usize, end: usize, step: usize) -> Result<Self> {
        if start % 2 == 0 {
            return Err(KnnError::InvalidParameter(format!(
                "k range must start at an odd k, got {start}"
            )));
        }
        if step == 0 || step % 2 != 0 {
            return Err(KnnError::InvalidParameter(format!(
                "k range step must be a positive even number, got {step}"
            )));
        }
        if start > end {
            return Err(KnnError::InvalidParameter(format!(
                "k range start {start} is greater than end {end}"
            )));
        }

        Ok(Self { start, end, step })
    }

    /// Odd values within `start..=end`
    pub fn odd(start: usize, end: usize) -> Result<Self> {
        let first = if start % 2 == 0 { start + 1 } else { start };
        if first > end {
            return Err(KnnError::InvalidParameter(format!(
                "no odd k between {start} and {end}"
            )));
        }
        Self::new(first, end, 2)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// The k values in ascending order
    pub fn values(&self) -> Vec<usize> {
        (self.start..=self.end).step_by(self.step).collect()
    }
}

impl Default for KRange {
    fn default() -> Self {
        Self {
            start: 3,
            end: 15,
            step: 2,
        }
    }
}

/// Sweep configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub k_range: KRange,
    pub metrics: Vec<Metric>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            k_range: KRange::default(),
            metrics: Metric::ALL.to_vec(),
        }
    }
}

/// Accuracy curve of one metric, in ascending-k order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSweep {
    pub metric: Metric,
    pub points: Vec<AccuracyPoint>,
}

impl MetricSweep {
    /// Highest accuracy; the smallest k wins ties
    pub fn best(&self) -> Option<AccuracyPoint> {
        self.scan(|candidate, current| candidate > current)
    }

    /// Lowest accuracy; the smallest k wins ties
    pub fn worst(&self) -> Option<AccuracyPoint> {
        self.scan(|candidate, current| candidate < current)
    }

    /// Accuracy measured at `k`, if it was part of the sweep
    pub fn accuracy_at(&self, k: usize) -> Option<f64> {
        self.points.iter().find(|p| p.k == k).map(|p| p.accuracy)
    }

    fn scan(&self, replaces: impl Fn(f64, f64) -> bool) -> Option<AccuracyPoint> {
        let mut points = self.points.iter().copied();
        let first = points.next()?;
        Some(points.fold(first, |current, candidate| {
            if replaces(candidate.accuracy, current.accuracy) {
                candidate
            } else {
                current
            }
        }))
    }
}

/// Accuracy for every swept (metric, k) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub sweeps: Vec<MetricSweep>,
}

impl SweepResult {
    /// Curve for a given metric
    pub fn for_metric(&self, metric: Metric) -> Option<&MetricSweep> {
        self.sweeps.iter().find(|s| s.metric == metric)
    }

    /// Accuracy for a (k, metric) pair
    pub fn accuracy(&self, k: usize, metric: Metric) -> Option<f64> {
        self.for_metric(metric)?.accuracy_at(k)
    }
}

/// A picked k with its accuracy and count confusion matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub k: usize,
    pub accuracy: f64,
    pub matrix: ConfusionMatrix,
}

/// Best and worst operating points of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricExtremes {
    pub metric: Metric,
    pub best: OperatingPoint,
    pub worst: OperatingPoint,
}

/// Full sweep output: accuracy curves plus per-metric extremes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub result: SweepResult,
    pub extremes: Vec<MetricExtremes>,
}

/// Measure accuracy for every metric and k
///
/// `k_values` are evaluated in the order given; pass them ascending for the
/// first-occurrence tie-break to favor the smallest k.
pub fn sweep(
    training: &[Sample],
    testing: &[Sample],
    k_values: &[usize],
    metrics: &[Metric],
) -> Result<SweepResult> {
    if k_values.is_empty() {
        return Err(KnnError::InvalidParameter(
            "sweep needs at least one k".to_string(),
        ));
    }
    if let Some(k) = k_values.iter().find(|&&k| k % 2 == 0) {
        return Err(KnnError::InvalidParameter(format!(
            "swept k must be a positive odd integer, got {k}"
        )));
    }
    if metrics.is_empty() {
        return Err(KnnError::InvalidParameter(
            "sweep needs at least one metric".to_string(),
        ));
    }

    let mut sweeps = Vec::with_capacity(metrics.len());
    for &metric in metrics {
        let mut points = Vec::with_capacity(k_values.len());
        for &k in k_values {
            let acc = accuracy(training, testing, k, &metric)?;
            debug!("{metric} k={k}: {acc:.2}%");
            points.push(AccuracyPoint::new(k, acc));
        }
        sweeps.push(MetricSweep { metric, points });
    }

    Ok(SweepResult { sweeps })
}

/// Recompute count confusion matrices at each metric's best and worst k
pub fn extremes(
    training: &[Sample],
    testing: &[Sample],
    result: &SweepResult,
) -> Result<Vec<MetricExtremes>> {
    result
        .sweeps
        .iter()
        .filter_map(|s| Some((s.metric, s.best()?, s.worst()?)))
        .map(|(metric, best, worst)| {
            info!(
                "{metric}: best k={} ({:.2}%), worst k={} ({:.2}%)",
                best.k, best.accuracy, worst.k, worst.accuracy
            );
            Ok(MetricExtremes {
                metric,
                best: operating_point(training, testing, best, metric)?,
                worst: operating_point(training, testing, worst, metric)?,
            })
        })
        .collect()
}

fn operating_point(
    training: &[Sample],
    testing: &[Sample],
    point: AccuracyPoint,
    metric: Metric,
) -> Result<OperatingPoint> {
    Ok(OperatingPoint {
        k: point.k,
        accuracy: point.accuracy,
        matrix: confusion_counts(training, testing, point.k, &metric)?,
    })
}

/// Run a configured sweep and extract its extremes
pub fn run(training: &[Sample], testing: &[Sample], config: &SweepConfig) -> Result<SweepOutcome> {
    let k_values = config.k_range.values();
    info!(
        "Sweeping k from {} to {} step {} over {} metrics",
        config.k_range.start(),
        config.k_range.end(),
        config.k_range.step(),
        config.metrics.len()
    );

    let result = sweep(training, testing, &k_values, &config.metrics)?;
    let extremes = extremes(training, testing, &result)?;
    Ok(SweepOutcome { result, extremes })
}
