//! Feature extraction for the fare model
//!
//! A fare query is turned into a fixed-order vector of category codes:
//! origin, destination, quarter, carrier.
use crate::encoder::CategoryEncoder;
use crate::errors::{FareError, Result};
use serde::{Deserialize, Serialize};

/// Number of features consumed by the fare model
pub const FEATURE_COUNT: usize = 4;

/// Feature names in vector order (dataset column names)
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["city1", "city2", "quarter", "carrier_lg"];

/// Encoded inputs in the order the model was fitted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    pub origin: usize,
    pub destination: usize,
    pub quarter: usize,
    pub carrier: usize,
}

impl FeatureVector {
    pub fn new(origin: usize, destination: usize, quarter: usize, carrier: usize) -> Self {
        Self {
            origin,
            destination,
            quarter,
            carrier,
        }
    }

    /// Codes as raw numeric model inputs
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.origin as f64,
            self.destination as f64,
            self.quarter as f64,
            self.carrier as f64,
        ]
    }
}

/// Raw, human-independent fare query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareQuery {
    /// Origin city as it appears in the dataset
    pub origin: String,
    /// Destination city as it appears in the dataset
    pub destination: String,
    /// Calendar quarter (1-4)
    pub quarter: u8,
    /// Carrier code (e.g. "AA")
    pub carrier: String,
}

impl FareQuery {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        quarter: u8,
        carrier: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            quarter,
            carrier: carrier.into(),
        }
    }
}

/// The four encoders fitted by one training run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareEncoders {
    pub origin: CategoryEncoder<String>,
    pub destination: CategoryEncoder<String>,
    pub quarter: CategoryEncoder<u8>,
    pub carrier: CategoryEncoder<String>,
}

impl FareEncoders {
    /// Encode a query into a feature vector
    pub fn encode(&self, query: &FareQuery) -> Result<FeatureVector> {
        Ok(FeatureVector {
            origin: self.origin.encode(&query.origin)?,
            destination: self.destination.encode(&query.destination)?,
            quarter: self.quarter.encode(&query.quarter)?,
            carrier: self.carrier.encode(&query.carrier)?,
        })
    }

    /// Decode a feature vector back into the raw query
    pub fn decode(&self, features: &FeatureVector) -> Result<FareQuery> {
        Ok(FareQuery {
            origin: self.origin.decode(features.origin)?.clone(),
            destination: self.destination.decode(features.destination)?.clone(),
            quarter: *self.quarter.decode(features.quarter)?,
            carrier: self.carrier.decode(features.carrier)?.clone(),
        })
    }

    /// Vocabulary size per feature, in vector order
    pub fn vocabulary_sizes(&self) -> [usize; FEATURE_COUNT] {
        [
            self.origin.len(),
            self.destination.len(),
            self.quarter.len(),
            self.carrier.len(),
        ]
    }

    /// Validate every vocabulary and the column each encoder claims
    pub fn validate(&self) -> Result<()> {
        let columns = [
            self.origin.column(),
            self.destination.column(),
            self.quarter.column(),
            self.carrier.column(),
        ];
        for (expected, actual) in FEATURE_NAMES.iter().zip(columns) {
            if *expected != actual {
                return Err(FareError::VersionMismatch(format!(
                    "encoder for '{expected}' was fitted on column '{actual}'"
                )));
            }
        }

        self.origin.validate()?;
        self.destination.validate()?;
        self.quarter.validate()?;
        self.carrier.validate()?;
        Ok(())
    }
}
