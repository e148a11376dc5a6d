//! Training configuration
//!
//! Defaults reproduce the reference run: `domestic.csv` in, an 80/20 split
//! seeded with 42, bundle written to `models/fare_bundle.json`. Values can
//! come from a TOML file and be overridden on the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::TrainerError;

/// Default held-out proportion
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default split seed
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Input CSV dataset
    pub dataset: PathBuf,
    /// Bundle output path
    pub output: PathBuf,
    /// Proportion of cleaned rows held out for evaluation, in [0, 1)
    pub test_fraction: f64,
    /// Seed for the train/test permutation
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("domestic.csv"),
            output: PathBuf::from("models/fare_bundle.json"),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl TrainingConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, TrainerError> {
        toml::from_str(contents).map_err(|e| TrainerError::Config(e.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, TrainerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TrainerError::Config(format!("unable to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), TrainerError> {
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(TrainerError::Config(format!(
                "test_fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.dataset.as_os_str().is_empty() {
            return Err(TrainerError::Config("dataset path is empty".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(TrainerError::Config("output path is empty".to_string()));
        }
        Ok(())
    }
}
