//! Repeated holdout error estimation.
use serde::{Deserialize, Serialize};

use crate::data_handling::Dataset;
use crate::error::{ClassifierError, ClassifierResult};
use crate::evaluation::metrics::error_rate;
use crate::evaluation::split::train_test_split;
use crate::models::classifier_trait::Classifier;

/// Parameters of the repeated holdout estimate.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct HoldoutConfig {
    pub ntrials: usize,
    pub test_size: f64,
}

impl Default for HoldoutConfig {
    fn default() -> Self {
        HoldoutConfig {
            ntrials: 100,
            test_size: 0.2,
        }
    }
}

impl HoldoutConfig {
    pub fn new(ntrials: usize, test_size: f64) -> Self {
        HoldoutConfig { ntrials, test_size }
    }

    fn validate(&self) -> ClassifierResult<()> {
        if self.ntrials == 0 {
            return Err(ClassifierError::InvalidParameter(
                "ntrials must be at least 1".to_string(),
            ));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ClassifierError::InvalidParameter(format!(
                "test_size = {} must be in (0, 1)",
                self.test_size
            )));
        }
        Ok(())
    }
}

/// Mean training and test error over a set of trials.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ErrorEstimate {
    pub train_error: f64,
    pub test_error: f64,
}

/// Fit `clf` on `ntrials` random splits of `dataset` and average the
/// training and test errors.
///
/// Trial `t` splits with seed `t`, so the estimate is reproducible. The same
/// classifier is refit on every trial; the sums are divided by `ntrials`.
pub fn error<C: Classifier + ?Sized>(
    clf: &mut C,
    dataset: &Dataset,
    config: &HoldoutConfig,
) -> ClassifierResult<ErrorEstimate> {
    config.validate()?;

    let mut train_error_total = 0.0;
    let mut test_error_total = 0.0;

    for trial in 0..config.ntrials {
        let split = train_test_split(dataset.n_samples(), config.test_size, trial as u64)?;
        if split.test_indices.is_empty() {
            return Err(ClassifierError::InvalidParameter(format!(
                "test_size = {} yields an empty test set for {} examples",
                config.test_size,
                dataset.n_samples()
            )));
        }
        let (train, test) = split.apply(dataset);

        clf.fit(&train.x, &train.y)?;

        let y_pred = clf.predict(&train.x)?;
        let train_error = error_rate(&train.y, &y_pred)?;

        let y_pred = clf.predict(&test.x)?;
        let test_error = error_rate(&test.y, &y_pred)?;

        log::debug!(
            "{} trial {}: train error {:.3}, test error {:.3}",
            clf.name(),
            trial,
            train_error,
            test_error
        );

        train_error_total += train_error;
        test_error_total += test_error;
    }

    let ntrials = config.ntrials as f64;
    Ok(ErrorEstimate {
        train_error: train_error_total / ntrials,
        test_error: test_error_total / ntrials,
    })
}
