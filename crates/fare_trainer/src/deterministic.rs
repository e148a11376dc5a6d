//! Deterministic utilities for reproducible training
//!
//! Provides an LCG-based RNG and a seeded train/test split so that the same
//! dataset and seed always hold out the same rows, on every platform.

use std::num::Wrapping;

use crate::errors::TrainerError;

/// Linear Congruential Generator for deterministic pseudo-randomness
/// Uses constants from Numerical Recipes (glibc)
#[derive(Clone, Debug)]
pub struct LcgRng {
    state: Wrapping<u64>,
}

impl LcgRng {
    // LCG constants (compatible with glibc)
    const MULTIPLIER: u64 = 1103515245;
    const INCREMENT: u64 = 12345;
    const MODULUS: u64 = 1 << 31;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Wrapping(seed % Self::MODULUS),
        }
    }

    /// Generate next random value in range [0, MODULUS)
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state * Wrapping(Self::MULTIPLIER) + Wrapping(Self::INCREMENT);
        self.state.0 & (Self::MODULUS - 1)
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        self.next_u64() % max
    }
}

/// Seeded Fisher-Yates permutation of `0..n`
pub fn permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = LcgRng::new(seed);

    for i in (1..n).rev() {
        let j = rng.next_range(i as u64 + 1) as usize;
        indices.swap(i, j);
    }

    indices
}

/// Row indices of each partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Hold out `ceil(n * test_fraction)` rows chosen by a seeded permutation
pub fn train_test_split(
    n: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit, TrainerError> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(TrainerError::Config(format!(
            "test_fraction must be in [0, 1), got {}",
            test_fraction
        )));
    }

    // Guard against 0.2 * 10 landing a hair above 2.0.
    let n_test = ((n as f64 * test_fraction) - 1e-9).ceil().max(0.0) as usize;
    let n_test = n_test.min(n);
    if n - n_test == 0 {
        return Err(TrainerError::Training(format!(
            "{} rows leave nothing to train on after holding out {}",
            n, n_test
        )));
    }

    let mut order = permutation(n, seed);
    let train = order.split_off(n_test);
    Ok(TrainTestSplit { train, test: order })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lcg_determinism() {
        let mut rng1 = LcgRng::new(42);
        let mut rng2 = LcgRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_lcg_range() {
        let mut rng = LcgRng::new(42);
        for _ in 0..100 {
            let val = rng.next_range(10);
            assert!(val < 10);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_permutation_covers_all_indices() {
        let perm = permutation(50, 42);
        let unique: HashSet<_> = perm.iter().copied().collect();

        assert_eq!(perm.len(), 50);
        assert_eq!(unique.len(), 50);
        assert_ne!(perm, (0..50).collect::<Vec<_>>());
        assert_eq!(perm, permutation(50, 42));
        assert_ne!(perm, permutation(50, 43));
    }

    #[test]
    fn test_split_sizes() {
        let split = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);

        let split = train_test_split(4, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.train.len(), 3);

        let split = train_test_split(7, 0.0, 42).unwrap();
        assert!(split.test.is_empty());
        assert_eq!(split.train.len(), 7);
    }

    #[test]
    fn test_split_partitions_are_disjoint() {
        let split = train_test_split(25, 0.2, 42).unwrap();
        let train: HashSet<_> = split.train.iter().collect();
        let test: HashSet<_> = split.test.iter().collect();

        assert!(train.is_disjoint(&test));
        assert_eq!(train.len() + test.len(), 25);
    }

    #[test]
    fn test_split_rejects_degenerate_inputs() {
        assert!(matches!(train_test_split(1, 0.2, 42), Err(TrainerError::Training(_))));
        assert!(matches!(train_test_split(10, 1.5, 42), Err(TrainerError::Config(_))));
    }
}
