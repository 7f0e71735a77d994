//! Labeled dataset container and helpers.
//!
//! A `Dataset` couples an `n x d` feature matrix with `n` integer labels and
//! the column names read from the source file. Sub-datasets for splits and
//! folds are produced with `select`.
use crate::error::{ClassifierError, ClassifierResult};
use crate::math::{Array1, Array2};

/// Class label type shared by every classifier.
pub type Label = i64;

#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Array1<Label>,
    pub feature_names: Vec<String>,
    pub label_name: String,
}

impl Dataset {
    pub fn new(
        x: Array2<f64>,
        y: Array1<Label>,
        feature_names: Vec<String>,
        label_name: impl Into<String>,
    ) -> ClassifierResult<Self> {
        check_shapes(&x, &y)?;
        if feature_names.len() != x.ncols() {
            return Err(ClassifierError::ShapeMismatch {
                expected: x.ncols(),
                found: feature_names.len(),
            });
        }
        Ok(Dataset {
            x,
            y,
            feature_names,
            label_name: label_name.into(),
        })
    }

    /// Build a dataset with generated names `x0..x{d-1}` and label `y`.
    pub fn unnamed(x: Array2<f64>, y: Array1<Label>) -> ClassifierResult<Self> {
        let names = (0..x.ncols()).map(|i| format!("x{}", i)).collect();
        Dataset::new(x, y, names, "y")
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Rows at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select_rows(indices),
            y: self.y.select(indices),
            feature_names: self.feature_names.clone(),
            label_name: self.label_name.clone(),
        }
    }

    pub fn feature_column(&self, col: usize) -> Array1<f64> {
        self.x.column(col)
    }

    pub fn class_counts(&self) -> Vec<(Label, usize)> {
        class_counts(self.y.as_slice())
    }

    pub fn log_summary(&self) {
        log::info!("----- Input Data Summary -----");
        log::info!(
            "{} examples, {} features ({})",
            self.n_samples(),
            self.n_features(),
            self.feature_names.join(", ")
        );
        for (label, count) in self.class_counts() {
            log::info!("{} = {}: {} examples", self.label_name, label, count);
        }
        log::info!("-------------------------------");
    }
}

/// Fail unless `x` has one row per label.
pub fn check_shapes(x: &Array2<f64>, y: &Array1<Label>) -> ClassifierResult<()> {
    if x.nrows() != y.len() {
        return Err(ClassifierError::ShapeMismatch {
            expected: x.nrows(),
            found: y.len(),
        });
    }
    Ok(())
}

/// Label frequencies in first-encountered order.
pub fn class_counts(labels: &[Label]) -> Vec<(Label, usize)> {
    let mut counts: Vec<(Label, usize)> = Vec::new();
    for &label in labels {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    counts
}

/// The `k` most frequent labels, most frequent first. Equal counts keep
/// first-encountered order.
pub fn most_common(labels: &[Label], k: usize) -> Vec<(Label, usize)> {
    let mut counts = class_counts(labels);
    // stable sort keeps insertion order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}
