//! Conversions between the crate containers and the ndarray types used by
//! the linfa backends.
use crate::data_handling::Label;
use crate::error::{ClassifierError, ClassifierResult};
use crate::math::{Array1, Array2};

pub fn to_ndarray(x: &Array2<f64>) -> ClassifierResult<ndarray::Array2<f64>> {
    ndarray::Array2::from_shape_vec(x.shape(), x.to_vec())
        .map_err(|e| ClassifierError::Backend(e.to_string()))
}

/// Maps arbitrary integer labels onto dense class indices `0..k`, sorted by
/// label value.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<Label>,
}

impl LabelEncoder {
    pub fn fit(y: &Array1<Label>) -> Self {
        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        LabelEncoder { classes }
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    pub fn encode(&self, y: &Array1<Label>) -> ClassifierResult<ndarray::Array1<usize>> {
        y.iter()
            .map(|label| {
                self.classes.binary_search(label).map_err(|_| {
                    ClassifierError::InvalidParameter(format!("unknown label {}", label))
                })
            })
            .collect()
    }

    pub fn decode(&self, idx: usize) -> Label {
        self.classes[idx]
    }
}
