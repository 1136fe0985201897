//! Report rendering for evaluations and sweeps
//!
//! Reports are plain data built from evaluation results. They render to
//! any writer as human-readable text or as pretty-printed JSON.

use crate::core::{AccuracyPoint, KnnError, Result, Sample};
use crate::evaluation::{accuracy, evaluate, Evaluation};
use crate::metric::Metric;
use crate::sweep::{self, SweepConfig, SweepOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = KnnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(KnnError::InvalidParameter(format!(
                "Unsupported report format: {other}. Use 'text' or 'json'"
            ))),
        }
    }
}

/// Common rendering behavior of reports
pub trait Report: Serialize {
    /// Write the human-readable form
    fn write_text<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    /// Write the report in the requested format
    fn render<W: Write>(&self, writer: &mut W, format: ReportFormat) -> Result<()> {
        match format {
            ReportFormat::Text => self.write_text(writer).map_err(KnnError::IoError),
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, self)
                    .map_err(|e| KnnError::SerializationError(e.to_string()))?;
                writeln!(writer).map_err(KnnError::IoError)
            }
        }
    }

    /// Render the report into a string
    fn to_string_as(&self, format: ReportFormat) -> Result<String> {
        let mut buffer = Vec::new();
        self.render(&mut buffer, format)?;
        String::from_utf8(buffer).map_err(|e| KnnError::SerializationError(e.to_string()))
    }

    /// Save the report to a file
    fn save_to_file<P: AsRef<Path>>(&self, path: P, format: ReportFormat) -> Result<()> {
        let file = File::create(path).map_err(KnnError::IoError)?;
        let mut writer = BufWriter::new(file);
        self.render(&mut writer, format)?;
        writer.flush().map_err(KnnError::IoError)
    }
}

/// Results of one metric in a single-k evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricReport {
    pub metric: Metric,
    /// Accuracy at the headline k
    pub accuracy: f64,
    /// Confusion matrices at the matrix k
    pub evaluation: Evaluation,
}

/// Accuracy per metric plus confusion matrices at a second k
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub library_version: String,
    pub generated_at: DateTime<Utc>,
    pub headline_k: usize,
    pub matrix_k: usize,
    pub metrics: Vec<MetricReport>,
}

impl EvaluationReport {
    /// Evaluate every metric at `headline_k` (accuracy) and `matrix_k` (matrices)
    pub fn compute(
        training: &[Sample],
        testing: &[Sample],
        headline_k: usize,
        matrix_k: usize,
        metrics: &[Metric],
    ) -> Result<Self> {
        let metrics = metrics
            .iter()
            .map(|&metric| {
                let evaluation = evaluate(training, testing, matrix_k, &metric)?;
                let accuracy = if headline_k == matrix_k {
                    evaluation.accuracy
                } else {
                    accuracy(training, testing, headline_k, &metric)?
                };
                Ok(MetricReport {
                    metric,
                    accuracy,
                    evaluation,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            library_version: crate::VERSION.to_string(),
            generated_at: Utc::now(),
            headline_k,
            matrix_k,
            metrics,
        })
    }
}

impl Report for EvaluationReport {
    fn write_text<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "Accuracy (k = {}):", self.headline_k)?;
        for entry in &self.metrics {
            writeln!(w, "  {}: {:.2}%", title_case(entry.metric), entry.accuracy)?;
        }
        writeln!(w)?;

        for entry in &self.metrics {
            writeln!(
                w,
                "Confusion matrix {} (percentage, k = {}):",
                entry.metric, self.matrix_k
            )?;
            write_percentages(w, &entry.evaluation.percentages)?;
            writeln!(w)?;
        }

        for entry in &self.metrics {
            writeln!(
                w,
                "Confusion matrix {} (count, k = {}):",
                entry.metric, self.matrix_k
            )?;
            write_counts(w, &entry.evaluation.counts.counts)?;
            let unclassified = entry.evaluation.counts.total_unclassified();
            if unclassified > 0 {
                writeln!(w, "  unclassified: {unclassified}")?;
            }
            writeln!(w)?;
        }

        Ok(())
    }
}

/// Accuracy curves with best and worst operating points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub library_version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: SweepOutcome,
}

impl SweepReport {
    /// Run a sweep and wrap its outcome
    pub fn compute(training: &[Sample], testing: &[Sample], config: &SweepConfig) -> Result<Self> {
        Ok(Self::from_outcome(sweep::run(training, testing, config)?))
    }

    pub fn from_outcome(outcome: SweepOutcome) -> Self {
        Self {
            library_version: crate::VERSION.to_string(),
            generated_at: Utc::now(),
            outcome,
        }
    }
}

impl Report for SweepReport {
    fn write_text<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for curve in &self.outcome.result.sweeps {
            write!(w, "{} dist:", title_case(curve.metric))?;
            write_points(w, &curve.points)?;
        }
        writeln!(w)?;

        for extreme in &self.outcome.extremes {
            for (case, point) in [("worst", &extreme.worst), ("best", &extreme.best)] {
                writeln!(
                    w,
                    "Confusion matrix {} ({} case @ k = {} and acc = {:.2}%)",
                    extreme.metric, case, point.k, point.accuracy
                )?;
                write_counts(w, &point.matrix.counts)?;
                writeln!(w)?;
            }
        }

        Ok(())
    }
}

fn title_case(metric: Metric) -> String {
    let name = metric.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn write_points<W: Write>(w: &mut W, points: &[AccuracyPoint]) -> io::Result<()> {
    for point in points {
        write!(w, " {} - {:.2}", point.k, point.accuracy)?;
    }
    writeln!(w)
}

fn write_counts<W: Write>(w: &mut W, rows: &[Vec<usize>]) -> io::Result<()> {
    for row in rows {
        let cells: Vec<String> = row.iter().map(|x| format!("{x:>5}")).collect();
        writeln!(w, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn write_percentages<W: Write>(w: &mut W, rows: &[Vec<f64>]) -> io::Result<()> {
    for row in rows {
        let cells: Vec<String> = row.iter().map(|x| format!("{x:>6.2}")).collect();
        writeln!(w, "{}", cells.join(" "))?;
    }
    Ok(())
}
