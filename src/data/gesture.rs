//! Gesture dataset implementation
//!
//! Supports loading whitespace-separated records of the form:
//! label feature_1 feature_2 ... feature_n
//!
//! Labels in the file are one-based and are converted to zero-based class
//! ids on load.
//!
//! Example:
//! 1 0.12 -0.40 1.75
//! 3 0.98 0.21 -0.03

use crate::core::{Dataset, KnnError, Result, Sample};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset of labeled gesture feature vectors
#[derive(Debug, Clone)]
pub struct GestureDataset {
    samples: Vec<Sample>,
    dimensions: usize,
}

impl GestureDataset {
    /// Load a dataset from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(KnnError::IoError)?;
        let reader = BufReader::new(file);
        let dataset = Self::from_reader(reader)?;
        debug!(
            "Loaded {} samples with {} features from {:?}",
            dataset.len(),
            dataset.dim(),
            path
        );
        Ok(dataset)
    }

    /// Load a dataset from a reader (for testing and flexibility)
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut samples: Vec<Sample> = Vec::new();
        let mut dimensions = 0;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(KnnError::IoError)?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let sample = Self::parse_line(line).map_err(|e| {
                KnnError::ParseError(format!("Error parsing line {}: {}", line_num + 1, e))
            })?;

            if samples.is_empty() {
                dimensions = sample.dim();
            } else if sample.dim() != dimensions {
                return Err(KnnError::DimensionMismatch {
                    expected: dimensions,
                    actual: sample.dim(),
                });
            }
            samples.push(sample);
        }

        Self::from_samples(samples)
    }

    /// Build a dataset from in-memory samples, checking they are well formed
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self> {
        let dimensions = crate::core::validate_samples(&samples)?;
        Ok(Self {
            samples,
            dimensions,
        })
    }

    /// Take ownership of the samples
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Parse a single record
    fn parse_line(line: &str) -> std::result::Result<Sample, String> {
        let mut tokens = line.split_whitespace();

        let label_token = tokens.next().ok_or_else(|| "Empty line".to_string())?;
        let label = label_token
            .parse::<usize>()
            .map_err(|_| format!("Invalid label: {label_token}"))?;

        // Labels are one-based in the file
        let label = label
            .checked_sub(1)
            .ok_or_else(|| format!("Label must be positive: {label}"))?;

        let features = tokens
            .map(|token| {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| format!("Invalid feature value: {token}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if features.is_empty() {
            return Err("Record has no features".to_string());
        }

        Ok(Sample::new(features, label))
    }
}

impl Dataset for GestureDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
