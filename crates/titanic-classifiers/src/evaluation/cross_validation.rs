//! Stratified k-fold cross-validation.
use crate::data_handling::{class_counts, Dataset};
use crate::error::{ClassifierError, ClassifierResult};
use crate::evaluation::metrics::accuracy_score;
use crate::models::classifier_trait::Classifier;

/// Assign every row to one of `k` folds, class by class.
///
/// The rows of each class, in dataset order, are cut into `k` contiguous
/// chunks; the first `n_c % k` chunks hold one extra row. Chunk `j` of every
/// class lands in fold `j`. No shuffling is involved.
pub fn stratified_folds(dataset: &Dataset, k: usize) -> ClassifierResult<Vec<Vec<usize>>> {
    let n = dataset.n_samples();
    if k < 2 || k > n {
        return Err(ClassifierError::InvalidParameter(format!(
            "number of folds {} must be in 2..={}",
            k, n
        )));
    }

    let mut folds = vec![Vec::new(); k];
    for (label, count) in class_counts(dataset.y.as_slice()) {
        if count < k {
            log::warn!(
                "Class {} has only {} members, fewer than {} folds",
                label,
                count,
                k
            );
        }
        let rows: Vec<usize> = dataset
            .y
            .iter()
            .enumerate()
            .filter_map(|(i, &l)| (l == label).then_some(i))
            .collect();

        let mut start = 0;
        for (fold, members) in folds.iter_mut().enumerate() {
            let size = count / k + usize::from(fold < count % k);
            members.extend_from_slice(&rows[start..start + size]);
            start += size;
        }
    }

    for members in folds.iter_mut() {
        members.sort_unstable();
    }
    Ok(folds)
}

/// Accuracy of `clf` on each of `k` stratified folds, training on the rest.
pub fn cross_val_score<C: Classifier + ?Sized>(
    clf: &mut C,
    dataset: &Dataset,
    k: usize,
) -> ClassifierResult<Vec<f64>> {
    let folds = stratified_folds(dataset, k)?;
    let mut scores = Vec::with_capacity(k);

    for (fold, test_indices) in folds.iter().enumerate() {
        if test_indices.is_empty() {
            return Err(ClassifierError::InvalidParameter(format!(
                "fold {} of {} is empty",
                fold, k
            )));
        }
        let train_indices: Vec<usize> = folds
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != fold)
            .flat_map(|(_, members)| members.iter().copied())
            .collect();

        let train = dataset.select(&train_indices);
        let test = dataset.select(test_indices);

        clf.fit(&train.x, &train.y)?;
        let y_pred = clf.predict(&test.x)?;
        scores.push(accuracy_score(&test.y, &y_pred)?);
    }

    Ok(scores)
}

/// `1 - mean(cross_val_score)`.
pub fn cross_val_error<C: Classifier + ?Sized>(
    clf: &mut C,
    dataset: &Dataset,
    k: usize,
) -> ClassifierResult<f64> {
    let scores = cross_val_score(clf, dataset, k)?;
    Ok(1.0 - scores.iter().sum::<f64>() / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Array1, Array2};

    fn dataset(labels: Vec<i64>) -> Dataset {
        let n = labels.len();
        let x = Array2::from_shape_vec((n, 1), (0..n).map(|i| i as f64).collect()).unwrap();
        Dataset::unnamed(x, Array1::from_vec(labels)).unwrap()
    }

    #[test]
    fn folds_cover_each_row_once_and_keep_class_balance() {
        let ds = dataset(vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1]);
        let folds = stratified_folds(&ds, 2).unwrap();
        assert_eq!(folds[0], vec![0, 1, 2, 6, 7]);
        assert_eq!(folds[1], vec![3, 4, 5, 8, 9]);
    }

    #[test]
    fn uneven_classes_fill_first_folds() {
        let ds = dataset(vec![1, 1, 1, 1, 1, 0, 0, 0]);
        let folds = stratified_folds(&ds, 3).unwrap();
        let sizes: Vec<usize> = folds.iter().map(|f| f.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2]);
        let mut all: Vec<usize> = folds.concat();
        all.sort_unstable();
        assert_eq!(all, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn invalid_fold_counts_are_rejected() {
        let ds = dataset(vec![0, 1, 0]);
        assert!(stratified_folds(&ds, 1).is_err());
        assert!(stratified_folds(&ds, 4).is_err());
    }
}
