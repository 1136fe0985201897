//! Integration tests for the rknn library
//!
//! These tests verify end-to-end functionality across multiple modules
//! and validate real-world usage scenarios.

use approx::assert_relative_eq;
use rknn::api::{quick, KNN};
use rknn::{
    accuracy, confusion_counts, confusion_percentages, predict, sweep, Dataset, GestureDataset,
    KnnError, Metric, Sample, SweepConfig,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Three well-separated gesture clusters with one deliberately misplaced test sample
fn gesture_split() -> (Vec<Sample>, Vec<Sample>) {
    let centers = [[0.0, 0.0, 0.0], [6.0, 0.0, 6.0], [0.0, 6.0, -6.0]];
    let jitter = [[0.1, 0.0, -0.1], [-0.2, 0.1, 0.0], [0.0, -0.1, 0.2], [0.15, 0.15, 0.1]];

    let mut training = Vec::new();
    for (label, center) in centers.iter().enumerate() {
        for delta in &jitter {
            let features = center.iter().zip(delta).map(|(c, d)| c + d).collect();
            training.push(Sample::new(features, label));
        }
    }

    let testing = vec![
        Sample::new(vec![0.05, 0.05, 0.0], 0),
        Sample::new(vec![5.9, 0.1, 6.1], 1),
        Sample::new(vec![6.1, -0.1, 5.8], 1),
        Sample::new(vec![0.1, 5.9, -6.0], 2),
        // Labeled 2 but sits on the class 0 cluster
        Sample::new(vec![0.0, 0.1, 0.1], 2),
    ];

    (training, testing)
}

fn write_dataset(samples: &[Sample]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for sample in samples {
        let features: Vec<String> = sample.features.iter().map(|f| f.to_string()).collect();
        writeln!(file, "{} {}", sample.label + 1, features.join(" ")).expect("Failed to write");
    }
    file.flush().expect("Failed to flush");
    file
}

/// Test complete workflow: data loading -> classification -> evaluation
#[test]
fn test_complete_workflow_from_files() {
    let (training, testing) = gesture_split();
    let train_file = write_dataset(&training);
    let test_file = write_dataset(&testing);

    let loaded_train = GestureDataset::from_file(train_file.path()).expect("Failed to load");
    let loaded_test = GestureDataset::from_file(test_file.path()).expect("Failed to load");
    assert_eq!(loaded_train.samples(), training.as_slice());
    assert_eq!(loaded_test.n_classes(), 3);

    let knn = KNN::new()
        .with_k(3)
        .with_metric(Metric::Euclidean)
        .fit(&loaded_train)
        .expect("Fit should succeed");
    let evaluation = knn.evaluate(&loaded_test).expect("Evaluation should succeed");

    assert_relative_eq!(evaluation.accuracy, 80.0);
    assert_eq!(
        evaluation.counts.counts,
        vec![vec![1, 0, 0], vec![0, 2, 0], vec![1, 0, 1]]
    );
    assert_relative_eq!(evaluation.percentages[2][0], 50.0);
    assert_relative_eq!(evaluation.percentages[2][2], 50.0);
}

#[test]
fn test_two_point_scenarios() {
    let training = vec![
        Sample::new(vec![0.0, 0.0], 0),
        Sample::new(vec![10.0, 10.0], 1),
    ];

    assert_eq!(predict(&training, &[1.0, 1.0], 1, &Metric::Euclidean).label, Some(0));
    assert_eq!(predict(&training, &[9.0, 9.0], 1, &Metric::Euclidean).label, Some(1));
}

#[test]
fn test_single_class_accuracy_and_matrix() {
    let training = vec![Sample::new(vec![3.0], 0), Sample::new(vec![4.0], 0)];
    let testing = vec![Sample::new(vec![3.5], 0)];

    for metric in Metric::ALL {
        assert_eq!(accuracy(&training, &testing, 1, &metric).unwrap(), 100.0);
        assert_eq!(
            confusion_counts(&training, &testing, 1, &metric).unwrap().counts,
            vec![vec![1]]
        );
    }
}

#[test]
fn test_matrix_invariants_hold_for_both_metrics() {
    let (training, testing) = gesture_split();

    for metric in Metric::ALL {
        for k in [1, 3, 5, 12] {
            let counts = confusion_counts(&training, &testing, k, &metric).unwrap();
            let percentages = confusion_percentages(&training, &testing, k, &metric).unwrap();
            let acc = accuracy(&training, &testing, k, &metric).unwrap();

            for label in 0..counts.n_classes() {
                let expected = testing.iter().filter(|s| s.label == label).count();
                assert_eq!(counts.row_sum(label), expected, "{metric} k={k}");

                if expected > 0 {
                    assert_relative_eq!(
                        percentages[label].iter().sum::<f64>(),
                        100.0,
                        epsilon = 1e-9
                    );
                }
            }

            let from_diagonal = 100.0 * counts.correct() as f64 / counts.total() as f64;
            assert_relative_eq!(acc, from_diagonal);
        }
    }
}

#[test]
fn test_sweep_and_extremes() {
    let (training, testing) = gesture_split();
    let result = sweep(&training, &testing, &[3, 5, 7], &Metric::ALL).unwrap();

    for curve in &result.sweeps {
        // The misplaced sample is wrong at every k
        assert!(curve.points.iter().all(|p| p.accuracy == 80.0));
        assert_eq!(curve.best().unwrap().k, 3);
        assert_eq!(curve.worst().unwrap().k, 3);
    }
}

#[test]
fn test_quick_sweep_files() {
    let (training, testing) = gesture_split();
    let train_file = write_dataset(&training);
    let test_file = write_dataset(&testing);

    let report = quick::sweep_files(train_file.path(), test_file.path(), &SweepConfig::default())
        .expect("Sweep should succeed");

    assert_eq!(report.outcome.result.sweeps.len(), 2);
    for extreme in &report.outcome.extremes {
        assert!(extreme.best.accuracy >= extreme.worst.accuracy);
        assert_eq!(extreme.best.matrix.n_classes(), 3);
    }
}

#[test]
fn test_input_faults_are_reported() {
    let (training, _) = gesture_split();

    let empty: Vec<Sample> = Vec::new();
    assert!(matches!(
        accuracy(&empty, &training, 3, &Metric::Euclidean),
        Err(KnnError::EmptyDataset)
    ));

    let wrong_dim = vec![Sample::new(vec![1.0, 2.0], 0)];
    assert!(matches!(
        confusion_counts(&training, &wrong_dim, 3, &Metric::Manhattan),
        Err(KnnError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
}
