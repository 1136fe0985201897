//! Demo sweeping k over a small synthetic gesture dataset

use rknn::api::quick;
use rknn::sweep::{KRange, SweepConfig};
use rknn::{Metric, Report, ReportFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::TempDir;

/// Write `per_class` samples around each center, one-based labels as on disk
fn write_gestures(
    path: &Path,
    centers: &[[f64; 3]],
    per_class: usize,
    seed: usize,
) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (label, center) in centers.iter().enumerate() {
        for i in 0..per_class {
            let jitter = |j: usize| ((i * 37 + j * 11 + seed * 7) % 23) as f64 / 23.0 - 0.5;
            writeln!(
                writer,
                "{} {:.4} {:.4} {:.4}",
                label + 1,
                center[0] + 2.5 * jitter(0),
                center[1] + 2.5 * jitter(1),
                center[2] + 2.5 * jitter(2)
            )?;
        }
    }
    writer.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Gesture k Sweep Demo ===");

    // Overlapping clusters, so accuracy moves with k
    let centers = [[0.0, 0.0, 0.0], [1.5, 1.0, 0.5], [3.0, 0.0, 1.0]];
    let dir = TempDir::new()?;
    let train_path = dir.path().join("training.dat");
    let test_path = dir.path().join("testing.dat");
    write_gestures(&train_path, &centers, 40, 1)?;
    write_gestures(&test_path, &centers, 10, 5)?;

    let config = SweepConfig {
        k_range: KRange::odd(1, 21)?,
        metrics: Metric::ALL.to_vec(),
    };
    let report = quick::sweep_files(&train_path, &test_path, &config)?;

    println!("\n--- Accuracy per k ---");
    let mut stdout = std::io::stdout().lock();
    report.render(&mut stdout, ReportFormat::Text)?;

    println!("--- Summary ---");
    for extreme in &report.outcome.extremes {
        println!(
            "{}: best k={} ({:.2}%), worst k={} ({:.2}%)",
            extreme.metric,
            extreme.best.k,
            extreme.best.accuracy,
            extreme.worst.k,
            extreme.worst.accuracy
        );
    }

    Ok(())
}
