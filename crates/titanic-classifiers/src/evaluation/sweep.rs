//! Hyperparameter sweeps and learning curves.
//!
//! Every driver returns its points in traversal order so they can be handed
//! straight to the plotting helpers in `report::plots`.
use itertools_num::linspace;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::data_handling::Dataset;
use crate::error::{ClassifierError, ClassifierResult};
use crate::evaluation::cross_validation::cross_val_error;
use crate::evaluation::holdout::{error, ErrorEstimate, HoldoutConfig};
use crate::evaluation::metrics::error_rate;
use crate::evaluation::split::train_test_split;
use crate::models::classifier_trait::Classifier;

/// A named `(x, y)` series, e.g. validation error against `k`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SweepSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl SweepSeries {
    pub fn new(name: impl Into<String>) -> Self {
        SweepSeries {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|(x, _)| *x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }

    /// The point with the lowest `y`; the first one wins ties.
    pub fn argmin(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .fold(None, |best: Option<(f64, f64)>, p| match best {
                Some(b) if b.1 <= p.1 => Some(b),
                _ => Some(p),
            })
    }
}

/// Cross-validation error for each hyperparameter value.
pub fn sweep_cross_validation<F>(
    name: &str,
    values: &[usize],
    mut make_model: F,
    dataset: &Dataset,
    folds: usize,
) -> ClassifierResult<SweepSeries>
where
    F: FnMut(usize) -> Box<dyn Classifier>,
{
    let mut series = SweepSeries::new(name);
    for &value in values {
        let mut clf = make_model(value);
        let cv_error = cross_val_error(&mut clf, dataset, folds)?;
        log::info!("{} = {}: {}-fold validation error {:.3}", name, value, folds, cv_error);
        series.points.push((value as f64, cv_error));
    }
    Ok(series)
}

/// Cross-validation, training and test error for one hyperparameter value.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct HoldoutSweepPoint {
    pub value: usize,
    pub cv_error: f64,
    pub holdout: ErrorEstimate,
}

/// For each value, a freshly built model is scored with `folds`-fold
/// cross-validation and with the repeated holdout evaluator.
pub fn sweep_with_holdout<F>(
    name: &str,
    values: &[usize],
    mut make_model: F,
    dataset: &Dataset,
    folds: usize,
    holdout: &HoldoutConfig,
) -> ClassifierResult<Vec<HoldoutSweepPoint>>
where
    F: FnMut(usize) -> Box<dyn Classifier>,
{
    let mut points = Vec::with_capacity(values.len());
    for &value in values {
        let mut clf = make_model(value);
        let cv_error = cross_val_error(&mut clf, dataset, folds)?;
        let estimate = error(&mut clf, dataset, holdout)?;
        log::info!(
            "{} = {}: validation {:.3}, train {:.3}, test {:.3}",
            name,
            value,
            cv_error,
            estimate.train_error,
            estimate.test_error
        );
        points.push(HoldoutSweepPoint {
            value,
            cv_error,
            holdout: estimate,
        });
    }
    Ok(points)
}

/// Split a holdout sweep into cross-validation, training and test series.
pub fn holdout_sweep_series(points: &[HoldoutSweepPoint]) -> Vec<SweepSeries> {
    let mut cv = SweepSeries::new("Cross Validation Error");
    let mut train = SweepSeries::new("Training Error");
    let mut test = SweepSeries::new("Testing Error");
    for p in points {
        let x = p.value as f64;
        cv.points.push((x, p.cv_error));
        train.points.push((x, p.holdout.train_error));
        test.points.push((x, p.holdout.test_error));
    }
    vec![cv, train, test]
}

/// Parameters of the training-set-size sweep.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LearningCurveConfig {
    /// Resampling trials per training fraction.
    pub ntrials: usize,
    /// Number of evenly spaced fractions in `(0, 1]`.
    pub steps: usize,
    /// Fraction of the data held out as the fixed test set.
    pub outer_test_size: f64,
    pub outer_seed: u64,
}

impl Default for LearningCurveConfig {
    fn default() -> Self {
        LearningCurveConfig {
            ntrials: 100,
            steps: 10,
            outer_test_size: 0.1,
            outer_seed: 1,
        }
    }
}

impl LearningCurveConfig {
    /// `1/steps, 2/steps, ..., 1.0`
    pub fn fractions(&self) -> Vec<f64> {
        if self.steps == 0 {
            return Vec::new();
        }
        linspace(1.0 / self.steps as f64, 1.0, self.steps).collect()
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LearningCurvePoint {
    pub fraction: f64,
    pub train_error: f64,
    pub test_error: f64,
    pub train_std: f64,
    pub test_std: f64,
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        0.0
    } else {
        values.iter().std_dev()
    }
}

/// Error of `clf` as a function of training-set size.
///
/// One outer split fixes the test set for the whole curve. For every
/// fraction, `ntrials` resamples (seeds `1..=ntrials`) draw that fraction of
/// the outer training rows; the model is refit on each subsample, scored on
/// it and on the fixed test set, and the errors are averaged over `ntrials`.
pub fn learning_curve<C: Classifier + ?Sized>(
    clf: &mut C,
    dataset: &Dataset,
    config: &LearningCurveConfig,
) -> ClassifierResult<Vec<LearningCurvePoint>> {
    if config.ntrials == 0 {
        return Err(ClassifierError::InvalidParameter(
            "ntrials must be at least 1".to_string(),
        ));
    }

    let outer = train_test_split(dataset.n_samples(), config.outer_test_size, config.outer_seed)?;
    if outer.test_indices.is_empty() {
        return Err(ClassifierError::InvalidParameter(format!(
            "outer_test_size = {} yields an empty test set",
            config.outer_test_size
        )));
    }
    let (train_set, test_set) = outer.apply(dataset);

    let mut points = Vec::with_capacity(config.steps);
    for fraction in config.fractions() {
        let inner_test_size = (1.0 - fraction).max(0.0);
        log::info!(
            "{}: training on {:.0}% of the training data",
            clf.name(),
            fraction * 100.0
        );

        let mut train_errors = Vec::with_capacity(config.ntrials);
        let mut test_errors = Vec::with_capacity(config.ntrials);

        for seed in 1..=config.ntrials as u64 {
            let split = train_test_split(train_set.n_samples(), inner_test_size, seed)?;
            let subsample = train_set.select(&split.train_indices);

            clf.fit(&subsample.x, &subsample.y)?;

            let y_pred = clf.predict(&subsample.x)?;
            train_errors.push(error_rate(&subsample.y, &y_pred)?);

            let y_pred = clf.predict(&test_set.x)?;
            test_errors.push(error_rate(&test_set.y, &y_pred)?);
        }

        let ntrials = config.ntrials as f64;
        let point = LearningCurvePoint {
            fraction,
            train_error: train_errors.iter().sum::<f64>() / ntrials,
            test_error: test_errors.iter().sum::<f64>() / ntrials,
            train_std: sample_std(&train_errors),
            test_std: sample_std(&test_errors),
        };
        log::debug!("{:?}", point);
        points.push(point);
    }

    Ok(points)
}

/// Training and test series of a learning curve, labelled with `model_name`.
pub fn learning_curve_series(model_name: &str, points: &[LearningCurvePoint]) -> Vec<SweepSeries> {
    let mut train = SweepSeries::new(format!("Training Error {}", model_name));
    let mut test = SweepSeries::new(format!("Testing Error {}", model_name));
    for p in points {
        train.points.push((p.fraction, p.train_error));
        test.points.push((p.fraction, p.test_error));
    }
    vec![train, test]
}
