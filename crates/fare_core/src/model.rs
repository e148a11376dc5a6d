//! Linear fare model
//!
//! Ordinary least squares over raw category codes:
//!
//! ```text
//! fare = intercept + w_origin * origin + w_dest * destination
//!                  + w_quarter * quarter + w_carrier * carrier
//! ```
//!
//! Codes are used as plain numbers, with no scaling and no regularization.
//! The fit centres the design matrix, solves the normal equations through
//! an SVD pseudo-inverse and recovers the intercept from the means. Rank
//! deficient designs therefore resolve to the minimum-norm solution.

use crate::errors::{FareError, Result};
use crate::features::{FeatureVector, FEATURE_COUNT};
use nalgebra::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};

/// Singular values below this fraction of the largest are treated as zero
const RELATIVE_SINGULAR_TOLERANCE: f64 = 1e-10;

/// Fitted linear regression parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareModel {
    /// One weight per feature, in feature vector order
    weights: Vec<f64>,
    /// Bias term
    intercept: f64,
}

impl FareModel {
    /// Build a model from known parameters
    pub fn from_parameters(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    /// Fit the model by ordinary least squares
    pub fn fit(features: &[FeatureVector], targets: &[f64]) -> Result<Self> {
        if features.is_empty() {
            return Err(FareError::InvalidTrainingData(
                "no samples to fit".to_string(),
            ));
        }
        if features.len() != targets.len() {
            return Err(FareError::InvalidTrainingData(format!(
                "{} feature rows but {} targets",
                features.len(),
                targets.len()
            )));
        }
        if let Some(idx) = targets.iter().position(|t| !t.is_finite()) {
            return Err(FareError::InvalidTrainingData(format!(
                "target at row {idx} is not finite"
            )));
        }

        let n = features.len() as f64;
        let rows: Vec<Vector4<f64>> = features
            .iter()
            .map(|f| Vector4::from(f.as_array()))
            .collect();

        let x_mean = rows.iter().fold(Vector4::zeros(), |acc, x| acc + x) / n;
        let y_mean = targets.iter().sum::<f64>() / n;

        let mut gram = Matrix4::<f64>::zeros();
        let mut moment = Vector4::<f64>::zeros();
        for (x, &y) in rows.iter().zip(targets) {
            let centred = x - x_mean;
            gram += centred * centred.transpose();
            moment += centred * (y - y_mean);
        }

        let svd = gram.svd(true, true);
        let eps = svd.singular_values.max() * RELATIVE_SINGULAR_TOLERANCE;
        let weights = svd
            .solve(&moment, eps)
            .map_err(|e| FareError::InvalidTrainingData(format!("least squares solve failed: {e}")))?;

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(FareError::InvalidTrainingData(
                "least squares produced non-finite weights".to_string(),
            ));
        }

        let intercept = y_mean - weights.dot(&x_mean);

        Ok(Self {
            weights: weights.iter().copied().collect(),
            intercept,
        })
    }

    /// Predicted fare for one feature vector
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.weights
            .iter()
            .zip(features.as_array())
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }

    pub fn predict_batch(&self, features: &[FeatureVector]) -> Vec<f64> {
        features.iter().map(|f| self.predict(f)).collect()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of features the parameters were fitted for
    pub fn feature_count(&self) -> usize {
        self.weights.len()
    }

    /// Check the parameter shape matches the feature vector
    pub fn validate(&self) -> Result<()> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(FareError::VersionMismatch(format!(
                "model has {} weights, expected {}",
                self.weights.len(),
                FEATURE_COUNT
            )));
        }
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(FareError::CorruptBundle(
                "model parameters are not finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(o: usize, d: usize, q: usize, c: usize) -> FeatureVector {
        FeatureVector::new(o, d, q, c)
    }

    #[test]
    fn test_recovers_exact_linear_relationship() {
        // fare = 50 + 10*o + 20*d + 5*q + 1*c
        let features = vec![
            fv(0, 0, 0, 0),
            fv(1, 0, 0, 0),
            fv(0, 1, 0, 0),
            fv(0, 0, 1, 0),
            fv(0, 0, 0, 1),
            fv(2, 3, 1, 4),
            fv(3, 1, 2, 2),
        ];
        let targets: Vec<f64> = features
            .iter()
            .map(|f| 50.0 + 10.0 * f.origin as f64 + 20.0 * f.destination as f64 + 5.0 * f.quarter as f64 + f.carrier as f64)
            .collect();

        let model = FareModel::fit(&features, &targets).unwrap();

        let expected = [10.0, 20.0, 5.0, 1.0];
        for (w, e) in model.weights().iter().zip(expected) {
            assert!((w - e).abs() < 1e-8, "weight {w} != {e}");
        }
        assert!((model.intercept() - 50.0).abs() < 1e-8);
        assert!((model.predict(&fv(1, 1, 1, 1)) - 86.0).abs() < 1e-8);
    }

    #[test]
    fn test_collinear_columns_take_minimum_norm_solution() {
        // Destination and carrier codes are identical; origin is constant.
        let features = vec![fv(0, 0, 0, 0), fv(0, 0, 1, 0), fv(0, 1, 0, 1), fv(0, 1, 1, 1)];
        let targets = vec![100.0, 110.0, 200.0, 220.0];

        let model = FareModel::fit(&features, &targets).unwrap();

        assert!(model.weights()[0].abs() < 1e-8);
        assert!((model.weights()[1] - model.weights()[3]).abs() < 1e-8);
        assert!((model.weights()[1] - 52.5).abs() < 1e-8);
        assert!((model.weights()[2] - 15.0).abs() < 1e-8);
        assert!((model.intercept() - 97.5).abs() < 1e-8);
    }

    #[test]
    fn test_constant_features_predict_mean() {
        let features = vec![fv(1, 1, 1, 1); 3];
        let model = FareModel::fit(&features, &[10.0, 20.0, 30.0]).unwrap();

        assert!(model.weights().iter().all(|w| w.abs() < 1e-12));
        assert!((model.predict(&fv(1, 1, 1, 1)) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let features = vec![fv(0, 2, 1, 0), fv(1, 0, 3, 2), fv(2, 1, 0, 1), fv(3, 3, 2, 0), fv(1, 1, 1, 1)];
        let targets = vec![120.0, 310.5, 99.9, 250.0, 180.25];

        let a = FareModel::fit(&features, &targets).unwrap();
        let b = FareModel::fit(&features, &targets).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            FareModel::fit(&[], &[]),
            Err(FareError::InvalidTrainingData(_))
        ));
        assert!(FareModel::fit(&[fv(0, 0, 0, 0)], &[1.0, 2.0]).is_err());
        assert!(FareModel::fit(&[fv(0, 0, 0, 0)], &[f64::NAN]).is_err());
    }

    #[test]
    fn test_validate_shape() {
        let model = FareModel::from_parameters(vec![1.0, 2.0, 3.0], 0.0);
        assert!(matches!(model.validate(), Err(FareError::VersionMismatch(_))));

        let model = FareModel::from_parameters(vec![1.0, 2.0, 3.0, 4.0], 0.5);
        assert!(model.validate().is_ok());
        assert_eq!(model.predict(&fv(1, 1, 1, 1)), 10.5);
    }
}
