//! Airfare Trainer CLI
//!
//! Trains the fare model from a CSV dataset and writes the model bundle.

use airfare_trainer::{run, TrainingConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "fare-train")]
#[command(author = "Airfare Predictor Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train the airfare model and write a model bundle", long_about = None)]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input CSV dataset path
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output bundle path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Proportion of rows held out for evaluation
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Seed for the train/test split
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => TrainingConfig::default(),
        };

        if let Some(input) = self.input {
            config.dataset = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(fraction) = self.test_fraction {
            config.test_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate().context("Invalid training configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = args.into_config()?;

    info!("Airfare Trainer v{}", airfare_trainer::VERSION);
    info!("Dataset: {}", config.dataset.display());
    info!("Output: {}", config.output.display());
    info!("Test fraction: {}, seed: {}", config.test_fraction, config.seed);

    let (path, outcome) = run(&config).context("Training failed")?;

    let metadata = &outcome.bundle.metadata;
    info!("✓ Training completed successfully");
    info!("  Bundle: {}", path.display());
    info!("  Hash: {}", outcome.bundle.content_hash()?);
    info!(
        "  Rows: {} train / {} test ({} dropped as incomplete)",
        metadata.train_rows, metadata.test_rows, outcome.cleaning.rows_dropped
    );
    if let Some(report) = &metadata.evaluation {
        info!("  MSE: {:.4}", report.mse);
        info!("  MAE: {:.4}", report.mae);
        info!("  R2: {:.4}", report.r2);
    }

    Ok(())
}
