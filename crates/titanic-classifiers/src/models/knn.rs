use linfa_nn::distance::L2Dist;
use linfa_nn::{CommonNearestNeighbour, NearestNeighbour};

use crate::data_handling::{check_shapes, Label};
use crate::error::{ClassifierError, ClassifierResult};
use crate::math::{Array1, Array2};
use crate::models::classifier_trait::Classifier;
use crate::models::utils::to_ndarray;

/// k-nearest-neighbours classifier. Neighbour search is delegated to a
/// `linfa-nn` KD-tree with euclidean distance; the predicted label is the
/// plurality vote of the `k` nearest training rows.
pub struct KNeighborsClassifier {
    n_neighbors: usize,
    records: Option<ndarray::Array2<f64>>,
    labels: Vec<Label>,
}

impl KNeighborsClassifier {
    pub fn new(n_neighbors: usize) -> Self {
        KNeighborsClassifier {
            n_neighbors,
            records: None,
            labels: Vec::new(),
        }
    }
}

/// Most frequent label among `neighbors`; ties go to the smallest label.
fn vote(neighbors: &[Label]) -> Option<Label> {
    let mut sorted = neighbors.to_vec();
    sorted.sort_unstable();

    let mut best: Option<(Label, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let label = sorted[i];
        let run = sorted[i..].iter().take_while(|&&l| l == label).count();
        if best.map_or(true, |(_, count)| run > count) {
            best = Some((label, run));
        }
        i += run;
    }
    best.map(|(label, _)| label)
}

impl Classifier for KNeighborsClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<Label>) -> ClassifierResult<()> {
        self.records = None;
        self.labels.clear();
        check_shapes(x, y)?;
        if x.nrows() == 0 {
            return Err(ClassifierError::EmptyDataset);
        }
        if self.n_neighbors == 0 || self.n_neighbors > x.nrows() {
            return Err(ClassifierError::InvalidParameter(format!(
                "n_neighbors = {} must be in 1..={}",
                self.n_neighbors,
                x.nrows()
            )));
        }

        self.records = Some(to_ndarray(x)?);
        self.labels = y.to_vec();
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> ClassifierResult<Array1<Label>> {
        let records = self
            .records
            .as_ref()
            .ok_or_else(|| ClassifierError::NotFitted(self.name().to_string()))?;
        if x.ncols() != records.ncols() {
            return Err(ClassifierError::ShapeMismatch {
                expected: records.ncols(),
                found: x.ncols(),
            });
        }

        let index = CommonNearestNeighbour::KdTree
            .from_batch(records, L2Dist)
            .map_err(|e| ClassifierError::Backend(e.to_string()))?;

        let queries = to_ndarray(x)?;
        let mut predictions = Vec::with_capacity(queries.nrows());
        for query in queries.rows() {
            let neighbors = index
                .k_nearest(query, self.n_neighbors)
                .map_err(|e| ClassifierError::Backend(e.to_string()))?;
            let neighbor_labels: Vec<Label> =
                neighbors.iter().map(|(_, idx)| self.labels[*idx]).collect();
            let label = vote(&neighbor_labels).ok_or(ClassifierError::EmptyDataset)?;
            predictions.push(label);
        }

        Ok(Array1::from_vec(predictions))
    }

    fn name(&self) -> &str {
        "KNeighborsClassifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_prefers_smallest_label_on_tie() {
        assert_eq!(vote(&[1, 0, 1, 0]), Some(0));
        assert_eq!(vote(&[3, 3, 1]), Some(3));
        assert_eq!(vote(&[]), None);
    }

    #[test]
    fn one_neighbor_memorises_training_set() {
        let x = Array2::from_shape_vec((4, 1), vec![0.0, 1.0, 10.0, 11.0]).unwrap();
        let y = Array1::from_vec(vec![0, 1, 1, 0]);
        let mut clf = KNeighborsClassifier::new(1);
        clf.fit(&x, &y).unwrap();
        assert_eq!(clf.predict(&x).unwrap(), y);
    }

    #[test]
    fn three_neighbors_follow_local_majority() {
        let x = Array2::from_shape_vec((6, 1), vec![0.0, 0.1, 0.2, 5.0, 5.1, 5.2]).unwrap();
        let y = Array1::from_vec(vec![0, 0, 1, 1, 1, 0]);
        let mut clf = KNeighborsClassifier::new(3);
        clf.fit(&x, &y).unwrap();
        let query = Array2::from_shape_vec((2, 1), vec![0.05, 5.05]).unwrap();
        assert_eq!(clf.predict(&query).unwrap().to_vec(), vec![0, 1]);
    }

    #[test]
    fn too_many_neighbors_is_rejected() {
        let x = Array2::from_shape_vec((2, 1), vec![0.0, 1.0]).unwrap();
        let y = Array1::from_vec(vec![0, 1]);
        let mut clf = KNeighborsClassifier::new(3);
        assert!(matches!(
            clf.fit(&x, &y),
            Err(ClassifierError::InvalidParameter(_))
        ));
    }

    #[test]
    fn failed_refit_discards_previous_fit() {
        let x = Array2::from_shape_vec((4, 1), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let y = Array1::from_vec(vec![1, 1, 0, 1]);
        let mut clf = KNeighborsClassifier::new(3);
        clf.fit(&x, &y).unwrap();

        let small = Array2::from_shape_vec((2, 1), vec![0.0, 1.0]).unwrap();
        assert!(clf.fit(&small, &Array1::from_vec(vec![7, 7])).is_err());
        assert!(matches!(
            clf.predict(&small),
            Err(ClassifierError::NotFitted(_))
        ));
    }
}
