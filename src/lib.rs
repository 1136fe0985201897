//! k-Nearest-Neighbors classifier evaluation
//!
//! Classifies labeled feature vectors by majority vote among their nearest
//! training samples and reports accuracy and confusion matrices, optionally
//! sweeping over the neighbor count.

pub mod api;
pub mod classifier;
pub mod core;
pub mod data;
pub mod evaluation;
pub mod metric;
pub mod report;
pub mod sweep;

// Re-export main types for convenience
pub use crate::api::{FittedKnn, KNN};
pub use crate::classifier::{predict, KnnClassifier, Neighbor};
pub use crate::core::error::KnnError;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::GestureDataset;
pub use crate::evaluation::{
    accuracy, confusion_counts, confusion_percentages, ConfusionMatrix, Evaluation,
};
pub use crate::metric::{Distance, EuclideanDistance, ManhattanDistance, Metric};
pub use crate::report::{EvaluationReport, Report, ReportFormat, SweepReport};
pub use crate::sweep::{sweep, KRange, SweepConfig, SweepOutcome, SweepResult};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
