//! Error estimation: splitting, accuracy, repeated holdout,
//! cross-validation and hyperparameter sweeps.
pub mod cross_validation;
pub mod holdout;
pub mod metrics;
pub mod split;
pub mod sweep;

pub use cross_validation::{cross_val_error, cross_val_score};
pub use holdout::{error, ErrorEstimate, HoldoutConfig};
pub use metrics::{accuracy_score, error_rate};
pub use split::{train_test_split, TrainTestSplit};
