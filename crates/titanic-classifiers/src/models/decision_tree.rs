use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};

use crate::config::SplitCriterion;
use crate::data_handling::{check_shapes, Label};
use crate::error::{ClassifierError, ClassifierResult};
use crate::math::{Array1, Array2};
use crate::models::classifier_trait::Classifier;
use crate::models::utils::{to_ndarray, LabelEncoder};

/// Decision tree classifier backed by `linfa-trees`.
pub struct DecisionTreeClassifier {
    model: Option<(DecisionTree<f64, usize>, LabelEncoder)>,
    criterion: SplitCriterion,
    max_depth: Option<usize>,
    n_features: usize,
}

impl DecisionTreeClassifier {
    pub fn new(criterion: SplitCriterion, max_depth: Option<usize>) -> Self {
        DecisionTreeClassifier {
            model: None,
            criterion,
            max_depth,
            n_features: 0,
        }
    }

    /// Entropy (information gain) splits, as used throughout the exercise.
    pub fn entropy(max_depth: Option<usize>) -> Self {
        DecisionTreeClassifier::new(SplitCriterion::Entropy, max_depth)
    }
}

impl Classifier for DecisionTreeClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<Label>) -> ClassifierResult<()> {
        self.model = None;
        check_shapes(x, y)?;
        if x.nrows() == 0 {
            return Err(ClassifierError::EmptyDataset);
        }
        if self.max_depth == Some(0) {
            return Err(ClassifierError::InvalidParameter(
                "max_depth must be at least 1".to_string(),
            ));
        }

        let encoder = LabelEncoder::fit(y);
        let dataset = Dataset::new(to_ndarray(x)?, encoder.encode(y)?);

        let split_quality = match self.criterion {
            SplitCriterion::Gini => SplitQuality::Gini,
            SplitCriterion::Entropy => SplitQuality::Entropy,
        };

        let tree = DecisionTree::<f64, usize>::params()
            .split_quality(split_quality)
            .max_depth(self.max_depth)
            .fit(&dataset)
            .map_err(|e| ClassifierError::Backend(e.to_string()))?;

        self.n_features = x.ncols();
        self.model = Some((tree, encoder));
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> ClassifierResult<Array1<Label>> {
        let (tree, encoder) = self
            .model
            .as_ref()
            .ok_or_else(|| ClassifierError::NotFitted(self.name().to_string()))?;
        if x.ncols() != self.n_features {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.n_features,
                found: x.ncols(),
            });
        }

        let records = to_ndarray(x)?;
        let predictions: ndarray::Array1<usize> = tree.predict(&records);
        Ok(predictions.iter().map(|&idx| encoder.decode(idx)).collect())
    }

    fn name(&self) -> &str {
        "DecisionTreeClassifier"
    }
}
