//! Airfare prediction core
//!
//! Encodes route queries into category codes, fits and evaluates a linear
//! fare model, and persists the fitted model together with its encoders as
//! one verified bundle.
//!
//! Modules:
//! - `encoder`: Sorted-vocabulary category encoders
//! - `features`: Feature vector layout and the per-column encoder set
//! - `model`: Ordinary least squares fare model
//! - `metrics`: Held-out evaluation metrics
//! - `serialization`: Canonical JSON and content hashing
//! - `bundle`: Atomic bundle persistence
//! - `inference`: Loaded-bundle prediction service

pub mod bundle;
pub mod encoder;
pub mod errors;
pub mod features;
pub mod inference;
pub mod metrics;
pub mod model;
pub mod serialization;

pub use bundle::{BundleMetadata, ModelBundle, BUNDLE_FORMAT_VERSION};
pub use encoder::CategoryEncoder;
pub use errors::{FareError, Result};
pub use features::{FareEncoders, FareQuery, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use inference::{load_bundle, FareOptions, FarePredictor};
pub use metrics::EvaluationReport;
pub use model::FareModel;

/// Crate version string for bundle metadata and reports
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
