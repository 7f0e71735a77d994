use crate::data_handling::Label;
use crate::error::ClassifierResult;
use crate::math::{Array1, Array2};

/// Fit/predict contract shared by the baselines and the library-backed
/// models. The evaluators only talk to classifiers through this trait.
pub trait Classifier {
    /// Fit the model on `x` (n x d) and `y` (n). Calling `fit` again discards
    /// everything learned by the previous call.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<Label>) -> ClassifierResult<()>;

    /// Predict one label per row of `x`. Fails with `NotFitted` before `fit`.
    fn predict(&self, x: &Array2<f64>) -> ClassifierResult<Array1<Label>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<Label>) -> ClassifierResult<()> {
        (**self).fit(x, y)
    }

    fn predict(&self, x: &Array2<f64>) -> ClassifierResult<Array1<Label>> {
        (**self).predict(x)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
