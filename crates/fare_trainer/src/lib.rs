//! Airfare Trainer - deterministic offline training for fare bundles
//!
//! Loads the domestic fare CSV, drops incomplete rows, fits the category
//! encoders and the linear fare model, evaluates on a seeded held-out split
//! and writes the resulting model bundle atomically.

pub mod config;
pub mod dataset;
pub mod deterministic;
pub mod errors;
pub mod trainer;

use std::path::{Path, PathBuf};
use tracing::info;

pub use config::TrainingConfig;
pub use dataset::{CleaningStats, Dataset, FareRecord, REQUIRED_COLUMNS};
pub use deterministic::{permutation, train_test_split, LcgRng, TrainTestSplit};
pub use errors::TrainerError;
pub use trainer::{FareTrainer, TrainingOutcome};

/// Train a bundle directly from a CSV file without persisting it.
pub fn train_from_csv(path: &Path, config: &TrainingConfig) -> Result<TrainingOutcome, TrainerError> {
    let dataset = Dataset::from_csv(path).map_err(|err| TrainerError::Dataset(format!("{err:#}")))?;
    info!(
        "Loaded {} rows, dropped {} incomplete, kept {}",
        dataset.stats.rows_read, dataset.stats.rows_dropped, dataset.stats.rows_kept
    );

    let trainer = FareTrainer::new(config.clone());
    let bundle = trainer.train(&dataset)?;
    Ok(TrainingOutcome {
        bundle,
        cleaning: dataset.stats,
    })
}

/// Run the full pipeline: load, clean, fit, evaluate and persist.
///
/// Returns the bundle path and the outcome. Nothing is written unless every
/// earlier step succeeded.
pub fn run(config: &TrainingConfig) -> Result<(PathBuf, TrainingOutcome), TrainerError> {
    config.validate()?;

    let outcome = train_from_csv(&config.dataset, config)?;
    outcome
        .bundle
        .save(&config.output)
        .map_err(|err| TrainerError::Persist(format!("{}: {err}", config.output.display())))?;

    Ok((config.output.clone(), outcome))
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
