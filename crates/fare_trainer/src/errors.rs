use airfare_core::FareError;
use thiserror::Error;

/// Errors returned by the training pipeline.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("training error: {0}")]
    Training(String),

    #[error("failed to persist bundle: {0}")]
    Persist(String),

    #[error(transparent)]
    Core(#[from] FareError),
}
