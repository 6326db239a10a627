//! Seeded permutation split of the sample axis.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::SplitError;

/// Requested split percentages and the shuffling seed.
#[derive(Debug, Clone)]
pub struct SplitSpec {
    train_pct: f64,
    val_pct: f64,
    test_pct: f64,
    seed: u64,
}

impl SplitSpec {
    /// Creates a split specification.
    ///
    /// # Arguments
    ///
    /// * `train_pct` / `val_pct` / `test_pct`: percentages of the total
    ///   sample count, applied in that order along the permutation.
    /// * `seed`: permutation seed; equal seeds give identical splits.
    pub fn new(train_pct: f64, val_pct: f64, test_pct: f64, seed: u64) -> Self {
        Self {
            train_pct,
            val_pct,
            test_pct,
            seed,
        }
    }

    /// Returns the train percentage.
    pub fn train_pct(&self) -> f64 {
        self.train_pct
    }

    /// Returns the validation percentage.
    pub fn val_pct(&self) -> f64 {
        self.val_pct
    }

    /// Returns the test percentage.
    pub fn test_pct(&self) -> f64 {
        self.test_pct
    }

    /// Returns the shuffling seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the percentages.
    ///
    /// Each must be finite and non-negative; their sum must not exceed
    /// 100. A sum below 100 is legal: the remainder is simply unused.
    pub fn validate(&self) -> Result<(), SplitError> {
        for (name, value) in [
            ("train", self.train_pct),
            ("validation", self.val_pct),
            ("test", self.test_pct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SplitError::InvalidPercentage { name, value });
            }
        }
        let sum = self.train_pct + self.val_pct + self.test_pct;
        if sum > 100.0 {
            return Err(SplitError::PercentageOverflow { sum });
        }
        Ok(())
    }

    /// Partitions `0..total` into the three index sets.
    ///
    /// Shuffles the full index range with a seeded Fisher-Yates pass, then
    /// takes `floor(total * pct / 100)` indices per set in train,
    /// validation, test order. The sets are disjoint by construction and
    /// deterministic for equal `(total, percentages, seed)`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::EmptyData`] for `total == 0` and the
    /// validation errors for bad percentages.
    pub fn split(&self, total: usize) -> Result<SampleSplit, SplitError> {
        self.validate()?;
        if total == 0 {
            return Err(SplitError::EmptyData);
        }

        let mut permutation: Vec<usize> = (0..total).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        permutation.shuffle(&mut rng);

        let n_train = count_for(total, self.train_pct);
        let n_val = count_for(total, self.val_pct);
        let n_test = count_for(total, self.test_pct);

        let train = permutation[..n_train].to_vec();
        let validation = permutation[n_train..n_train + n_val].to_vec();
        let test = permutation[n_train + n_val..n_train + n_val + n_test].to_vec();

        debug!(
            total,
            n_train,
            n_val,
            n_test,
            unused = total - n_train - n_val - n_test,
            "sample split computed"
        );
        Ok(SampleSplit {
            train,
            validation,
            test,
        })
    }
}

/// Floor count for one percentage of the total.
fn count_for(total: usize, pct: f64) -> usize {
    (total as f64 * pct / 100.0).floor() as usize
}

/// Three disjoint index sets into the sample axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSplit {
    train: Vec<usize>,
    validation: Vec<usize>,
    test: Vec<usize>,
}

impl SampleSplit {
    /// Training indices.
    pub fn train(&self) -> &[usize] {
        &self.train
    }

    /// Validation indices.
    pub fn validation(&self) -> &[usize] {
        &self.validation
    }

    /// Test indices.
    pub fn test(&self) -> &[usize] {
        &self.test
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn counts_follow_floor_of_percentages() {
        let spec = SplitSpec::new(65.0, 15.0, 20.0, 0);
        let s = spec.split(366).unwrap();
        assert_eq!(s.train().len(), 237); // floor(366 * 0.65)
        assert_eq!(s.validation().len(), 54); // floor(366 * 0.15)
        assert_eq!(s.test().len(), 73); // floor(366 * 0.20)
    }

    #[test]
    fn sets_are_disjoint_and_in_range() {
        let spec = SplitSpec::new(60.0, 20.0, 20.0, 7);
        let s = spec.split(100).unwrap();
        let mut seen = BTreeSet::new();
        for &i in s.train().iter().chain(s.validation()).chain(s.test()) {
            assert!(i < 100);
            assert!(seen.insert(i), "index {i} appears in more than one set");
        }
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn remainder_is_excluded_not_redistributed() {
        let spec = SplitSpec::new(50.0, 20.0, 10.0, 3);
        let s = spec.split(100).unwrap();
        let used = s.train().len() + s.validation().len() + s.test().len();
        assert_eq!(used, 80);
    }

    #[test]
    fn same_seed_same_split() {
        let spec = SplitSpec::new(65.0, 15.0, 20.0, 42);
        assert_eq!(spec.split(366).unwrap(), spec.split(366).unwrap());
    }

    #[test]
    fn different_seed_different_split() {
        let a = SplitSpec::new(65.0, 15.0, 20.0, 1).split(366).unwrap();
        let b = SplitSpec::new(65.0, 15.0, 20.0, 2).split(366).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_total_rejected() {
        let spec = SplitSpec::new(65.0, 15.0, 20.0, 0);
        assert!(matches!(spec.split(0), Err(SplitError::EmptyData)));
    }

    #[test]
    fn negative_percentage_rejected() {
        let spec = SplitSpec::new(-1.0, 15.0, 20.0, 0);
        assert!(matches!(
            spec.split(10),
            Err(SplitError::InvalidPercentage { name: "train", .. })
        ));
    }

    #[test]
    fn overflow_rejected() {
        let spec = SplitSpec::new(70.0, 20.0, 20.0, 0);
        assert!(matches!(
            spec.split(10),
            Err(SplitError::PercentageOverflow { .. })
        ));
    }
}
