//! Integration tests for cross-validation sweeps and the learning curve.

use titanic_classifiers::config::ModelType;
use titanic_classifiers::data_handling::Dataset;
use titanic_classifiers::evaluation::sweep::{
    holdout_sweep_series, learning_curve, learning_curve_series, sweep_cross_validation,
    sweep_with_holdout, LearningCurveConfig,
};
use titanic_classifiers::evaluation::{
    cross_val_score, error_rate, train_test_split, HoldoutConfig,
};
use titanic_classifiers::math::{Array1, Array2};
use titanic_classifiers::models::factory::build_model;
use titanic_classifiers::models::{Classifier, MajorityVoteClassifier};

/// Two well separated 1-D clusters of 20 points each.
fn clusters() -> Dataset {
    let mut values = Vec::new();
    let mut labels = Vec::new();
    for i in 0..20 {
        values.push(i as f64 * 0.1);
        labels.push(0);
        values.push(10.0 + i as f64 * 0.1);
        labels.push(1);
    }
    let x = Array2::from_shape_vec((40, 1), values).unwrap();
    Dataset::unnamed(x, Array1::from_vec(labels)).unwrap()
}

#[test]
fn cross_val_score_returns_one_score_per_fold() {
    let ds = clusters();
    let mut clf = build_model(&ModelType::knn(3));
    let scores = cross_val_score(&mut clf, &ds, 10).unwrap();
    assert_eq!(scores.len(), 10);
    assert!(scores.iter().all(|&s| s == 1.0));
}

#[test]
fn majority_vote_cross_validation_error_on_balanced_data() {
    let ds = clusters();
    let mut clf = MajorityVoteClassifier::new();
    let scores = cross_val_score(&mut clf, &ds, 4).unwrap();
    // every fold holds 5 rows of each class
    assert!(scores.iter().all(|&s| (s - 0.5).abs() < 1e-12));
}

#[test]
fn neighbor_sweep_keeps_traversal_order() {
    let ds = clusters();
    let ks: Vec<usize> = (1..=5).collect();
    let series =
        sweep_cross_validation("k", &ks, |k| build_model(&ModelType::knn(k)), &ds, 5).unwrap();
    assert_eq!(series.xs(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert!(series.ys().iter().all(|&e| e == 0.0));
}

#[test]
fn depth_sweep_reports_cv_and_holdout_errors() {
    let ds = clusters();
    let depths = [1, 2, 3];
    let points = sweep_with_holdout(
        "max_depth",
        &depths,
        |d| build_model(&ModelType::entropy_tree(Some(d))),
        &ds,
        5,
        &HoldoutConfig::new(4, 0.2),
    )
    .unwrap();

    assert_eq!(points.iter().map(|p| p.value).collect::<Vec<_>>(), vec![1, 2, 3]);
    let series = holdout_sweep_series(&points);
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].name, "Cross Validation Error");
    assert!(points.iter().all(|p| p.holdout.train_error == 0.0));
}

#[test]
fn learning_curve_has_one_point_per_fraction() {
    let ds = clusters();
    let config = LearningCurveConfig {
        ntrials: 3,
        steps: 4,
        outer_test_size: 0.25,
        outer_seed: 1,
    };
    let mut clf = MajorityVoteClassifier::new();
    let points = learning_curve(&mut clf, &ds, &config).unwrap();

    let fractions: Vec<f64> = points.iter().map(|p| p.fraction).collect();
    assert_eq!(fractions.len(), 4);
    assert!((fractions[3] - 1.0).abs() < 1e-12);
    for p in &points {
        assert!((0.0..=1.0).contains(&p.train_error));
        assert!((0.0..=1.0).contains(&p.test_error));
    }
    // the full training set is identical in every trial
    assert_eq!(points[3].train_std, 0.0);
    assert_eq!(points[3].test_std, 0.0);

    let series = learning_curve_series("Majority", &points);
    assert_eq!(series[1].name, "Testing Error Majority");
}

#[test]
fn learning_curve_refits_ntrials_times_per_fraction() {
    struct Counter(MajorityVoteClassifier, usize);
    impl Classifier for Counter {
        fn fit(
            &mut self,
            x: &Array2<f64>,
            y: &Array1<i64>,
        ) -> titanic_classifiers::error::ClassifierResult<()> {
            self.1 += 1;
            self.0.fit(x, y)
        }
        fn predict(
            &self,
            x: &Array2<f64>,
        ) -> titanic_classifiers::error::ClassifierResult<Array1<i64>> {
            self.0.predict(x)
        }
    }

    let config = LearningCurveConfig {
        ntrials: 7,
        steps: 3,
        ..LearningCurveConfig::default()
    };
    let mut clf = Counter(MajorityVoteClassifier::new(), 0);
    learning_curve(&mut clf, &clusters(), &config).unwrap();
    assert_eq!(clf.1, 21);
}

#[test]
fn learning_curve_averages_over_ntrials() {
    let ds = clusters();
    let config = LearningCurveConfig {
        ntrials: 3,
        steps: 2,
        outer_test_size: 0.25,
        outer_seed: 1,
    };
    let mut clf = MajorityVoteClassifier::new();
    let points = learning_curve(&mut clf, &ds, &config).unwrap();

    let outer = train_test_split(ds.n_samples(), 0.25, 1).unwrap();
    let (train_set, test_set) = outer.apply(&ds);

    for point in &points {
        let mut train_total = 0.0;
        let mut test_total = 0.0;
        for seed in 1..=3u64 {
            let split =
                train_test_split(train_set.n_samples(), 1.0 - point.fraction, seed).unwrap();
            let subsample = train_set.select(&split.train_indices);
            let mut majority = MajorityVoteClassifier::new();
            majority.fit(&subsample.x, &subsample.y).unwrap();
            train_total +=
                error_rate(&subsample.y, &majority.predict(&subsample.x).unwrap()).unwrap();
            test_total += error_rate(&test_set.y, &majority.predict(&test_set.x).unwrap()).unwrap();
        }
        assert!((point.train_error - train_total / 3.0).abs() < 1e-12);
        assert!((point.test_error - test_total / 3.0).abs() < 1e-12);
    }
    // both classes keep at least 10 rows in the full training subsample
    assert!(points[1].train_error > 0.3);
}
