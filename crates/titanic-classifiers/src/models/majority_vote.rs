use crate::data_handling::{check_shapes, most_common, Label};
use crate::error::{ClassifierError, ClassifierResult};
use crate::math::{Array1, Array2};
use crate::models::classifier_trait::Classifier;

/// A classifier that always predicts the most frequent training label.
#[derive(Debug, Clone, Default)]
pub struct MajorityVoteClassifier {
    prediction: Option<Label>,
}

impl MajorityVoteClassifier {
    pub fn new() -> Self {
        MajorityVoteClassifier { prediction: None }
    }

    /// The fitted majority label, if any.
    pub fn prediction(&self) -> Option<Label> {
        self.prediction
    }
}

impl Classifier for MajorityVoteClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<Label>) -> ClassifierResult<()> {
        self.prediction = None;
        check_shapes(x, y)?;
        let (majority, count) = most_common(y.as_slice(), 1)
            .into_iter()
            .next()
            .ok_or(ClassifierError::EmptyDataset)?;
        log::debug!("Majority label {} ({} of {} examples)", majority, count, y.len());
        self.prediction = Some(majority);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> ClassifierResult<Array1<Label>> {
        let label = self
            .prediction
            .ok_or_else(|| ClassifierError::NotFitted(self.name().to_string()))?;
        Ok(Array1::from_elem(x.nrows(), label))
    }

    fn name(&self) -> &str {
        "MajorityVoteClassifier"
    }
}
