//! Inference service
//!
//! Owns one loaded [`ModelBundle`] and answers fare queries against it.
//! The bundle is read-only after load; every prediction is a pure function
//! of the bundle and the query.

use crate::bundle::{BundleMetadata, ModelBundle};
use crate::errors::Result;
use crate::features::{FareEncoders, FareQuery};
use crate::model::FareModel;
use std::path::Path;
use tracing::{debug, info};

/// Load and verify a persisted bundle
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<ModelBundle> {
    ModelBundle::load(path)
}

/// Selection choices offered to a caller, one list per input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareOptions<'a> {
    pub origins: &'a [String],
    pub destinations: &'a [String],
    pub quarters: &'a [u8],
    pub carriers: &'a [String],
}

/// Fare predictions backed by one training run
#[derive(Debug, Clone)]
pub struct FarePredictor {
    bundle: ModelBundle,
}

impl FarePredictor {
    pub fn new(bundle: ModelBundle) -> Result<Self> {
        bundle.validate()?;
        Ok(Self { bundle })
    }

    /// Load a bundle from disk and wrap it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bundle = load_bundle(path)?;
        info!(
            "Loaded fare model from {} (vocabularies {:?})",
            path.display(),
            bundle.encoders.vocabulary_sizes()
        );
        Ok(Self { bundle })
    }

    /// Predict the fare for raw inputs
    pub fn predict_fare(
        &self,
        origin: &str,
        destination: &str,
        quarter: u8,
        carrier_code: &str,
    ) -> Result<f64> {
        self.predict(&FareQuery::new(origin, destination, quarter, carrier_code))
    }

    pub fn predict(&self, query: &FareQuery) -> Result<f64> {
        let features = self.bundle.encoders.encode(query)?;
        let fare = self.bundle.model.predict(&features);
        debug!("Predicted {:.2} for {:?} ({:?})", fare, query, features);
        Ok(fare)
    }

    pub fn options(&self) -> FareOptions<'_> {
        let encoders = &self.bundle.encoders;
        FareOptions {
            origins: encoders.origin.vocabulary(),
            destinations: encoders.destination.vocabulary(),
            quarters: encoders.quarter.vocabulary(),
            carriers: encoders.carrier.vocabulary(),
        }
    }

    pub fn metadata(&self) -> &BundleMetadata {
        &self.bundle.metadata
    }

    pub fn model(&self) -> &FareModel {
        &self.bundle.model
    }

    pub fn encoders(&self) -> &FareEncoders {
        &self.bundle.encoders
    }

    pub fn into_bundle(self) -> ModelBundle {
        self.bundle
    }
}
