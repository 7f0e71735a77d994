use std::error::Error;
use std::fmt;

/// Failures raised by classifiers and the evaluation routines.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// `predict` was called before `fit`.
    NotFitted(String),
    /// Row count of the feature matrix and label vector disagree, or a
    /// prediction matrix has a different column count than the training data.
    ShapeMismatch { expected: usize, found: usize },
    EmptyDataset,
    InvalidParameter(String),
    /// Error reported by a linfa backend.
    Backend(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassifierError::NotFitted(name) => {
                write!(f, "{} not initialized. Perform a fit first.", name)
            }
            ClassifierError::ShapeMismatch { expected, found } => write!(
                f,
                "Shape mismatch: expected {} but found {}",
                expected, found
            ),
            ClassifierError::EmptyDataset => write!(f, "Cannot operate on an empty dataset"),
            ClassifierError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ClassifierError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl Error for ClassifierError {}

pub type ClassifierResult<T> = Result<T, ClassifierError>;
