//! Error types for the fare core

use thiserror::Error;

/// Errors raised by encoders, the fare model and bundle persistence
#[derive(Error, Debug)]
pub enum FareError {
    /// Value absent from a fitted vocabulary
    #[error("Unknown category {value:?} for column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// Decode requested for a code outside the vocabulary
    #[error("Invalid code {code} for column '{column}' (vocabulary size {size})")]
    InvalidCode {
        column: String,
        code: usize,
        size: usize,
    },

    /// Encoder fit on an empty sequence
    #[error("Cannot fit encoder for column '{column}' on an empty sequence")]
    EmptyVocabulary { column: String },

    /// Model fit preconditions violated
    #[error("Invalid training data: {0}")]
    InvalidTrainingData(String),

    /// Persisted bundle unreadable or inconsistent with its hash
    #[error("Corrupt model bundle: {0}")]
    CorruptBundle(String),

    /// Bundle format or model/encoder shape disagreement
    #[error("Model bundle version mismatch: {0}")]
    VersionMismatch(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for fare core operations
pub type Result<T> = std::result::Result<T, FareError>;
