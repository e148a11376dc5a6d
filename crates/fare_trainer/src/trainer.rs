//! Fare model training pipeline
//!
//! Fits one category encoder per column over the cleaned dataset, encodes
//! every record, fits the linear fare model on the training partition and
//! evaluates it on the held-out rows.

use airfare_core::{
    BundleMetadata, CategoryEncoder, EvaluationReport, FareEncoders, FareModel, FareQuery,
    FeatureVector, ModelBundle,
};
use tracing::{debug, info};

use crate::config::TrainingConfig;
use crate::dataset::{CleaningStats, Dataset};
use crate::deterministic::train_test_split;
use crate::errors::TrainerError;

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub bundle: ModelBundle,
    pub cleaning: CleaningStats,
}

/// Fare model trainer
pub struct FareTrainer {
    config: TrainingConfig,
}

impl FareTrainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Fit the four column encoders over the cleaned records
    pub fn fit_encoders(dataset: &Dataset) -> Result<FareEncoders, TrainerError> {
        let records = &dataset.records;
        let encoders = FareEncoders {
            origin: CategoryEncoder::fit("city1", records.iter().map(|r| r.origin.clone()))?,
            destination: CategoryEncoder::fit(
                "city2",
                records.iter().map(|r| r.destination.clone()),
            )?,
            quarter: CategoryEncoder::fit("quarter", records.iter().map(|r| r.quarter))?,
            carrier: CategoryEncoder::fit("carrier_lg", records.iter().map(|r| r.carrier.clone()))?,
        };
        Ok(encoders)
    }

    /// Encode every record; target is the list fare
    pub fn build_features(
        dataset: &Dataset,
        encoders: &FareEncoders,
    ) -> Result<(Vec<FeatureVector>, Vec<f64>), TrainerError> {
        let features = dataset
            .records
            .iter()
            .map(|r| {
                encoders.encode(&FareQuery {
                    origin: r.origin.clone(),
                    destination: r.destination.clone(),
                    quarter: r.quarter,
                    carrier: r.carrier.clone(),
                })
            })
            .collect::<airfare_core::Result<Vec<_>>>()?;

        Ok((features, dataset.targets()))
    }

    /// Train a bundle on the given dataset
    pub fn train(&self, dataset: &Dataset) -> Result<ModelBundle, TrainerError> {
        self.config.validate()?;

        let encoders = Self::fit_encoders(dataset)?;
        let sizes = encoders.vocabulary_sizes();
        info!(
            "Fitted encoders: {} origins, {} destinations, {} quarters, {} carriers",
            sizes[0], sizes[1], sizes[2], sizes[3]
        );

        let (features, targets) = Self::build_features(dataset, &encoders)?;

        let split = train_test_split(features.len(), self.config.test_fraction, self.config.seed)?;
        info!(
            "Split {} rows into {} train / {} test (seed {})",
            features.len(),
            split.train.len(),
            split.test.len(),
            self.config.seed
        );

        let (train_x, train_y) = select(&features, &targets, &split.train);
        let (test_x, test_y) = select(&features, &targets, &split.test);

        let model = FareModel::fit(&train_x, &train_y)?;
        info!("Intercept: {:.4}", model.intercept());
        for (name, weight) in airfare_core::FEATURE_NAMES.iter().zip(model.weights()) {
            debug!("  weight[{}] = {:.6}", name, weight);
        }

        let evaluation = EvaluationReport::compute(&test_y, &model.predict_batch(&test_x));
        match &evaluation {
            Some(report) => info!(
                "Held-out metrics: MSE={:.4} MAE={:.4} R2={:.4} ({} rows)",
                report.mse, report.mae, report.r2, report.rows
            ),
            None => info!("No held-out rows; skipping evaluation"),
        }

        let mut metadata = BundleMetadata::for_encoders(&encoders);
        metadata.train_rows = train_x.len();
        metadata.test_rows = test_x.len();
        metadata.evaluation = evaluation;
        metadata.seed = self.config.seed;
        metadata.test_fraction = self.config.test_fraction;
        metadata.created_at = chrono::Utc::now().timestamp().max(0) as u64;

        Ok(ModelBundle::new(model, encoders, metadata)?)
    }
}

fn select(features: &[FeatureVector], targets: &[f64], indices: &[usize]) -> (Vec<FeatureVector>, Vec<f64>) {
    indices.iter().map(|&i| (features[i], targets[i])).unzip()
}
