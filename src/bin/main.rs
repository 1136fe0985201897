//! RKNN Command Line Interface
//!
//! A command-line interface for evaluating k-nearest-neighbor classification
//! on gesture datasets and sweeping over the neighbor count.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use rknn::api::{quick, KNN};
use rknn::core::{KnnError, Result};
use rknn::report::{Report, ReportFormat};
use rknn::sweep::{KRange, SweepConfig};
use rknn::{Dataset, KnnConfig, Metric};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "rknn")]
#[command(about = "k-nearest-neighbor classifier evaluation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "RKNN Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Accuracy and confusion matrices at fixed k
    Evaluate(EvaluateArgs),
    /// Accuracy over a range of k with best/worst confusion matrices
    Sweep(SweepArgs),
    /// Print the predicted label of every sample in a data file
    Predict(PredictArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliMetric {
    /// Both metrics
    All,
    Euclidean,
    Manhattan,
}

impl CliMetric {
    fn metrics(self) -> Vec<Metric> {
        match self {
            CliMetric::All => Metric::ALL.to_vec(),
            CliMetric::Euclidean => vec![Metric::Euclidean],
            CliMetric::Manhattan => vec![Metric::Manhattan],
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliFormat {
    Text,
    Json,
}

impl From<CliFormat> for ReportFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => ReportFormat::Text,
            CliFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(Args)]
struct DataArgs {
    /// Training data file
    #[arg(long)]
    train: PathBuf,

    /// Testing data file
    #[arg(long)]
    test: PathBuf,

    /// Distance metric(s) to evaluate
    #[arg(short, long, value_enum, default_value = "all")]
    metric: CliMetric,
}

#[derive(Args)]
struct OutputArgs {
    /// Also write the report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: CliFormat,
}

#[derive(Args)]
struct EvaluateArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Neighbor count for the accuracy summary
    #[arg(short, long, default_value = "30")]
    k: usize,

    /// Neighbor count for the confusion matrices
    #[arg(long, default_value = "10")]
    matrix_k: usize,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct SweepArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Smallest k (odd)
    #[arg(long, default_value = "3")]
    k_min: usize,

    /// Largest k (inclusive)
    #[arg(long, default_value = "15")]
    k_max: usize,

    /// Distance between consecutive k values (even)
    #[arg(long, default_value = "2")]
    k_step: usize,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct PredictArgs {
    /// Training data file
    #[arg(long)]
    train: PathBuf,

    /// Data file to classify
    #[arg(long)]
    data: PathBuf,

    /// Number of voting neighbors
    #[arg(short, long, default_value = "10")]
    k: usize,

    /// Distance metric
    #[arg(short, long, default_value = "euclidean")]
    metric: Metric,

    /// Output predictions file (optional, prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Evaluate(args) => evaluate_command(args),
        Commands::Sweep(args) => sweep_command(args),
        Commands::Predict(args) => predict_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    info!(
        "Evaluating {:?} against {:?}",
        args.data.test, args.data.train
    );
    info!("Parameters: k={}, matrix k={}", args.k, args.matrix_k);

    let report = quick::evaluation_report(
        &args.data.train,
        &args.data.test,
        args.k,
        args.matrix_k,
        &args.data.metric.metrics(),
    )?;

    emit(&report, &args.output)
}

fn sweep_command(args: SweepArgs) -> Result<()> {
    let config = SweepConfig {
        k_range: KRange::new(args.k_min, args.k_max, args.k_step)?,
        metrics: args.data.metric.metrics(),
    };
    info!(
        "Sweeping {:?} against {:?}, k={}..={} step {}",
        args.data.test,
        args.data.train,
        config.k_range.start(),
        config.k_range.end(),
        config.k_range.step()
    );

    let report = quick::sweep_files(&args.data.train, &args.data.test, &config)?;

    emit(&report, &args.output)
}

fn predict_command(args: PredictArgs) -> Result<()> {
    let (training, data) = quick::load_split(&args.train, &args.data)?;
    info!(
        "Classifying {} samples against {} training samples (k={}, metric={})",
        data.len(),
        training.len(),
        args.k,
        args.metric
    );

    let knn = KNN::with_config(KnnConfig {
        k: args.k,
        metric: args.metric,
    })
    .fit(&training)?;
    let predictions = knn.predict_dataset(&data)?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    writeln!(writer, "# Predictions for {} samples", predictions.len())?;
    writeln!(writer, "# Format: sample_index predicted_label true_label")?;
    for (i, (pred, sample)) in predictions.iter().zip(data.samples()).enumerate() {
        // Labels are written back in the one-based file convention
        let predicted = pred
            .label
            .map_or_else(|| "?".to_string(), |l| (l + 1).to_string());
        writeln!(writer, "{} {} {}", i, predicted, sample.label + 1)?;
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        info!("Predictions saved to: {path:?}");
    }

    Ok(())
}

/// Print a report to stdout and optionally save it
fn emit<R: Report>(report: &R, output: &OutputArgs) -> Result<()> {
    let format = ReportFormat::from(output.format);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    report.render(&mut handle, format)?;
    handle.flush().map_err(KnnError::IoError)?;

    if let Some(path) = &output.output {
        save_report(report, path, format)?;
    }
    Ok(())
}

fn save_report<R: Report>(report: &R, path: &Path, format: ReportFormat) -> Result<()> {
    report.save_to_file(path, format)?;
    info!("Report saved to: {path:?}");
    Ok(())
}
