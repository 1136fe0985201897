//! Core traits for KNN evaluation

use crate::core::{Label, Sample};

/// Dataset abstraction over an ordered collection of labeled samples
pub trait Dataset {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// All samples, in input order
    fn samples(&self) -> &[Sample];

    /// Get a single sample by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn get_sample(&self, i: usize) -> &Sample {
        &self.samples()[i]
    }

    /// Get all labels as a vector
    fn get_labels(&self) -> Vec<Label> {
        self.samples().iter().map(|s| s.label).collect()
    }

    /// Number of classes implied by the largest label
    fn n_classes(&self) -> usize {
        self.samples()
            .iter()
            .map(|s| s.label + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Dataset for [Sample] {
    fn len(&self) -> usize {
        <[Sample]>::len(self)
    }

    fn dim(&self) -> usize {
        self.first().map_or(0, Sample::dim)
    }

    fn samples(&self) -> &[Sample] {
        self
    }
}

impl Dataset for Vec<Sample> {
    fn len(&self) -> usize {
        <[Sample]>::len(self)
    }

    fn dim(&self) -> usize {
        self.as_slice().dim()
    }

    fn samples(&self) -> &[Sample] {
        self
    }
}
