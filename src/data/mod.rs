//! Data loading and dataset implementations
//!
//! This module provides implementations of the Dataset trait for the
//! on-disk formats the evaluator reads.

pub mod gesture;

pub use self::gesture::*;
