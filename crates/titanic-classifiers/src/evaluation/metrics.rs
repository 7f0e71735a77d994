use crate::data_handling::Label;
use crate::error::{ClassifierError, ClassifierResult};
use crate::math::Array1;

/// Fraction of predictions exactly equal to the true labels.
pub fn accuracy_score(y_true: &Array1<Label>, y_pred: &Array1<Label>) -> ClassifierResult<f64> {
    if y_true.len() != y_pred.len() {
        return Err(ClassifierError::ShapeMismatch {
            expected: y_true.len(),
            found: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(ClassifierError::EmptyDataset);
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// `1 - accuracy`.
pub fn error_rate(y_true: &Array1<Label>, y_pred: &Array1<Label>) -> ClassifierResult<f64> {
    Ok(1.0 - accuracy_score(y_true, y_pred)?)
}
