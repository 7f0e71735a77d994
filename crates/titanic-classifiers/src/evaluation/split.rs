use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data_handling::Dataset;
use crate::error::{ClassifierError, ClassifierResult};

// Guards ceil() against products such as 0.7 * 10 = 7.000000000000001.
const FRACTION_EPS: f64 = 1e-9;

/// Disjoint train/test row indices covering `0..n` exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    pub fn apply(&self, dataset: &Dataset) -> (Dataset, Dataset) {
        (
            dataset.select(&self.train_indices),
            dataset.select(&self.test_indices),
        )
    }
}

/// Number of test rows for `n` samples: `ceil(test_size * n)`.
pub fn test_count(n: usize, test_size: f64) -> usize {
    ((test_size * n as f64) - FRACTION_EPS).ceil().max(0.0) as usize
}

/// Shuffle `0..n` with a generator seeded from `seed` and cut off the first
/// `ceil(test_size * n)` indices as the test set.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> ClassifierResult<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(ClassifierError::InvalidParameter(format!(
            "test_size = {} must be in [0, 1)",
            test_size
        )));
    }
    let n_test = test_count(n, test_size);
    if n_test >= n {
        return Err(ClassifierError::InvalidParameter(format!(
            "test_size = {} leaves no training rows out of {}",
            test_size, n
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);

    let train_indices = indices.split_off(n_test);
    Ok(TrainTestSplit {
        train_indices,
        test_indices: indices,
    })
}
