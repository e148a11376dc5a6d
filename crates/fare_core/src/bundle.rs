//! Model bundle persistence
//!
//! A bundle is the single unit written by a training run and read by an
//! inference session: the fitted [`FareModel`], the four category encoders
//! it was fitted against, and run metadata. On disk it is one canonical
//! JSON document:
//!
//! ```text
//! {"content_hash":"<blake3 hex of payload>","payload":{"encoders":..,"metadata":..,"model":..}}
//! ```
//!
//! Files are written to a temporary sibling, fsynced and renamed into
//! place, so a reader either sees the previous bundle or the new one.

use crate::errors::{FareError, Result};
use crate::features::{FareEncoders, FEATURE_COUNT, FEATURE_NAMES};
use crate::metrics::EvaluationReport;
use crate::model::FareModel;
use crate::serialization::{content_hash_hex, to_canonical_json, value_to_canonical_json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Current on-disk bundle format
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// Facts about the training run that produced a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMetadata {
    pub format_version: u32,
    /// Feature names in vector order
    pub feature_names: Vec<String>,
    /// Vocabulary size per feature, in vector order
    pub vocabulary_sizes: Vec<usize>,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Held-out metrics; absent when the test partition was empty
    pub evaluation: Option<EvaluationReport>,
    pub seed: u64,
    pub test_fraction: f64,
    /// Unix timestamp (seconds) of the training run
    pub created_at: u64,
}

impl BundleMetadata {
    /// Metadata for a run over `encoders`; the caller fills in the run facts.
    pub fn for_encoders(encoders: &FareEncoders) -> Self {
        Self {
            format_version: BUNDLE_FORMAT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            vocabulary_sizes: encoders.vocabulary_sizes().to_vec(),
            train_rows: 0,
            test_rows: 0,
            evaluation: None,
            seed: 0,
            test_fraction: 0.0,
            created_at: 0,
        }
    }
}

/// Fitted model and encoders from one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub model: FareModel,
    pub encoders: FareEncoders,
    pub metadata: BundleMetadata,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    content_hash: String,
    payload: Value,
}

impl ModelBundle {
    /// Assemble a bundle, rejecting mismatched model and encoders
    pub fn new(model: FareModel, encoders: FareEncoders, metadata: BundleMetadata) -> Result<Self> {
        let bundle = Self {
            model,
            encoders,
            metadata,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Check the model, encoders and metadata describe the same feature space
    pub fn validate(&self) -> Result<()> {
        if self.metadata.format_version != BUNDLE_FORMAT_VERSION {
            return Err(FareError::VersionMismatch(format!(
                "bundle format {} is not supported (expected {})",
                self.metadata.format_version, BUNDLE_FORMAT_VERSION
            )));
        }

        self.model.validate()?;
        self.encoders.validate()?;

        if self.metadata.feature_names.len() != FEATURE_COUNT
            || self
                .metadata
                .feature_names
                .iter()
                .zip(FEATURE_NAMES)
                .any(|(actual, expected)| actual != expected)
        {
            return Err(FareError::VersionMismatch(format!(
                "feature order {:?} does not match {:?}",
                self.metadata.feature_names, FEATURE_NAMES
            )));
        }

        let sizes = self.encoders.vocabulary_sizes();
        if self.metadata.vocabulary_sizes != sizes {
            return Err(FareError::VersionMismatch(format!(
                "model was trained on vocabulary sizes {:?} but encoders hold {:?}",
                self.metadata.vocabulary_sizes, sizes
            )));
        }

        Ok(())
    }

    /// BLAKE3 hash of the canonical payload
    pub fn content_hash(&self) -> Result<String> {
        Ok(content_hash_hex(&to_canonical_json(self)?))
    }

    /// Serialize to the canonical on-disk representation
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload = to_canonical_json(self)?;
        let envelope = Envelope {
            content_hash: content_hash_hex(&payload),
            payload: serde_json::from_str(&payload)?,
        };
        Ok(to_canonical_json(&envelope)?.into_bytes())
    }

    /// Parse and verify a serialized bundle
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let envelope: Envelope = serde_json::from_slice(bytes)
            .map_err(|e| FareError::CorruptBundle(format!("unreadable bundle: {e}")))?;

        let payload_json = value_to_canonical_json(envelope.payload.clone())?;
        let actual_hash = content_hash_hex(&payload_json);
        if actual_hash != envelope.content_hash {
            return Err(FareError::CorruptBundle(format!(
                "content hash mismatch: stored {}, computed {}",
                envelope.content_hash, actual_hash
            )));
        }

        // Report an unknown format before attempting to read its shape.
        if let Some(version) = envelope
            .payload
            .pointer("/metadata/format_version")
            .and_then(Value::as_u64)
        {
            if version != u64::from(BUNDLE_FORMAT_VERSION) {
                return Err(FareError::VersionMismatch(format!(
                    "bundle format {version} is not supported (expected {BUNDLE_FORMAT_VERSION})"
                )));
            }
        }

        let bundle: ModelBundle = serde_json::from_value(envelope.payload)
            .map_err(|e| FareError::CorruptBundle(format!("unexpected bundle shape: {e}")))?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Atomically write the bundle to `path`, returning its content hash
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        self.validate()?;
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| FareError::Io(e.error))?;

        let hash = self.content_hash()?;
        info!("Saved model bundle to {} ({} bytes)", path.display(), bytes.len());
        debug!("Bundle content hash: {}", hash);
        Ok(hash)
    }

    /// Read and verify a bundle file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let bundle = Self::from_slice(&bytes)?;
        debug!("Loaded model bundle from {}", path.display());
        Ok(bundle)
    }
}
