use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DEFAULT_RANDOM_SEED;
use crate::data_handling::{check_shapes, most_common, Label};
use crate::error::{ClassifierError, ClassifierResult};
use crate::math::{Array1, Array2};
use crate::models::classifier_trait::Classifier;

/// A classifier that predicts by sampling the training class distribution.
///
/// Only the `max_classes` most frequent labels are kept (two by default), so
/// with more classes the stored probabilities no longer sum to one. Sampling
/// renormalises the weights.
#[derive(Debug, Clone)]
pub struct RandomClassifier {
    probabilities: Option<Vec<(Label, f64)>>,
    seed: u64,
    max_classes: usize,
}

impl Default for RandomClassifier {
    fn default() -> Self {
        RandomClassifier::new()
    }
}

impl RandomClassifier {
    pub fn new() -> Self {
        RandomClassifier::with_params(DEFAULT_RANDOM_SEED, 2)
    }

    pub fn with_params(seed: u64, max_classes: usize) -> Self {
        RandomClassifier {
            probabilities: None,
            seed,
            max_classes,
        }
    }

    /// Fitted `(label, probability)` pairs, most frequent first.
    pub fn probabilities(&self) -> Option<&[(Label, f64)]> {
        self.probabilities.as_deref()
    }

    /// Predict with a fresh generator seeded from `seed`.
    pub fn predict_seeded(&self, x: &Array2<f64>, seed: u64) -> ClassifierResult<Array1<Label>> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.predict_with_rng(x, &mut rng)
    }

    /// Draw one label per row of `x`, with replacement, from the fitted
    /// distribution using the caller's random source.
    pub fn predict_with_rng<R: Rng + ?Sized>(
        &self,
        x: &Array2<f64>,
        rng: &mut R,
    ) -> ClassifierResult<Array1<Label>> {
        let probabilities = self
            .probabilities
            .as_ref()
            .ok_or_else(|| ClassifierError::NotFitted(self.name().to_string()))?;

        let weights = probabilities.iter().map(|(_, p)| *p);
        let sampler =
            WeightedIndex::new(weights).map_err(|e| ClassifierError::Backend(e.to_string()))?;

        Ok((0..x.nrows())
            .map(|_| probabilities[sampler.sample(rng)].0)
            .collect())
    }
}

impl Classifier for RandomClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<Label>) -> ClassifierResult<()> {
        self.probabilities = None;
        check_shapes(x, y)?;
        if self.max_classes == 0 {
            return Err(ClassifierError::InvalidParameter(
                "max_classes must be at least 1".to_string(),
            ));
        }
        let n = x.nrows();
        if n == 0 {
            return Err(ClassifierError::EmptyDataset);
        }

        let distribution: Vec<(Label, f64)> = most_common(y.as_slice(), self.max_classes)
            .into_iter()
            .map(|(label, count)| (label, count as f64 / n as f64))
            .collect();

        if distribution.len() < 2 {
            log::warn!(
                "RandomClassifier fitted on a single class; predictions are constant"
            );
        }
        log::debug!("RandomClassifier distribution: {:?}", distribution);

        self.probabilities = Some(distribution);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> ClassifierResult<Array1<Label>> {
        self.predict_seeded(x, self.seed)
    }

    fn name(&self) -> &str {
        "RandomClassifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(n: usize) -> Array2<f64> {
        Array2::from_shape_vec((n, 1), vec![0.0; n]).unwrap()
    }

    #[test]
    fn probabilities_follow_training_frequencies() {
        let y = Array1::from_vec(vec![1, 0, 0, 0]);
        let mut clf = RandomClassifier::new();
        clf.fit(&features(4), &y).unwrap();
        assert_eq!(clf.probabilities().unwrap(), &[(0, 0.75), (1, 0.25)]);
    }

    #[test]
    fn keeps_only_two_most_frequent_classes_by_default() {
        let y = Array1::from_vec(vec![2, 2, 2, 1, 1, 0]);
        let mut clf = RandomClassifier::new();
        clf.fit(&features(6), &y).unwrap();
        let probs = clf.probabilities().unwrap();
        assert_eq!(probs.len(), 2);
        assert_eq!(probs[0], (2, 0.5));
        assert!((probs[1].1 - 2.0 / 6.0).abs() < 1e-12);

        let preds = clf.predict(&features(200)).unwrap();
        assert!(preds.iter().all(|&l| l == 2 || l == 1));
    }

    #[test]
    fn max_classes_can_cover_every_label() {
        let y = Array1::from_vec(vec![2, 2, 2, 1, 1, 0]);
        let mut clf = RandomClassifier::with_params(7, 3);
        clf.fit(&features(6), &y).unwrap();
        let total: f64 = clf.probabilities().unwrap().iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_class_degrades_to_constant_predictions() {
        let y = Array1::from_vec(vec![4, 4, 4]);
        let mut clf = RandomClassifier::new();
        clf.fit(&features(3), &y).unwrap();
        assert_eq!(clf.probabilities().unwrap(), &[(4, 1.0)]);
        assert_eq!(clf.predict(&features(5)).unwrap().to_vec(), vec![4; 5]);
    }

    #[test]
    fn refit_does_not_accumulate_classes() {
        let mut clf = RandomClassifier::new();
        clf.fit(&features(2), &Array1::from_vec(vec![0, 1])).unwrap();
        clf.fit(&features(2), &Array1::from_vec(vec![5, 6])).unwrap();
        let labels: Vec<Label> = clf.probabilities().unwrap().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec![5, 6]);
    }

    #[test]
    fn same_seed_same_predictions() {
        let y = Array1::from_vec(vec![0, 1, 1, 0, 1]);
        let mut clf = RandomClassifier::new();
        clf.fit(&features(5), &y).unwrap();
        let a = clf.predict_seeded(&features(50), 99).unwrap();
        let b = clf.predict_seeded(&features(50), 99).unwrap();
        assert_eq!(a, b);
        assert_eq!(clf.predict(&features(50)).unwrap(), clf.predict(&features(50)).unwrap());
    }

    #[test]
    fn predict_before_fit_fails() {
        let clf = RandomClassifier::new();
        assert!(matches!(
            clf.predict(&features(1)),
            Err(ClassifierError::NotFitted(_))
        ));
    }

    #[test]
    fn failed_refit_discards_previous_fit() {
        let mut clf = RandomClassifier::new();
        clf.fit(&features(2), &Array1::from_vec(vec![0, 1])).unwrap();

        assert!(matches!(
            clf.fit(&features(0), &Array1::from_vec(Vec::new())),
            Err(ClassifierError::EmptyDataset)
        ));
        assert!(clf.probabilities().is_none());
        assert!(matches!(
            clf.predict(&features(1)),
            Err(ClassifierError::NotFitted(_))
        ));
    }
}
