//! Held-out evaluation metrics

use serde::{Deserialize, Serialize};

/// Regression quality on a held-out partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean squared error
    pub mse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Number of rows evaluated
    pub rows: usize,
}

impl EvaluationReport {
    /// Compare predictions against actual fares.
    ///
    /// Returns `None` when there is nothing to evaluate or the slices
    /// disagree in length.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Option<Self> {
        if actual.is_empty() || actual.len() != predicted.len() {
            return None;
        }

        Some(Self {
            mse: mse(actual, predicted),
            mae: mae(actual, predicted),
            r2: r_squared(actual, predicted),
            rows: actual.len(),
        })
    }
}

/// Mean squared error
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    sum / actual.len() as f64
}

/// Mean absolute error
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();
    sum / actual.len() as f64
}

/// R-squared.
///
/// A constant target has no variance to explain: the score is 1.0 for a
/// perfect prediction and 0.0 otherwise, so the value is always finite.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_values() {
        let actual = [100.0, 200.0, 300.0];
        let predicted = [110.0, 190.0, 300.0];

        let report = EvaluationReport::compute(&actual, &predicted).unwrap();

        assert!((report.mse - 200.0 / 3.0).abs() < 1e-9);
        assert!((report.mae - 20.0 / 3.0).abs() < 1e-9);
        assert!((report.r2 - (1.0 - 200.0 / 20_000.0)).abs() < 1e-9);
        assert_eq!(report.rows, 3);
    }

    #[test]
    fn test_empty_or_mismatched() {
        assert!(EvaluationReport::compute(&[], &[]).is_none());
        assert!(EvaluationReport::compute(&[1.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_constant_target_r2_is_finite() {
        assert_eq!(r_squared(&[5.0, 5.0], &[5.0, 5.0]), 1.0);
        assert_eq!(r_squared(&[5.0, 5.0], &[4.0, 6.0]), 0.0);
    }
}
