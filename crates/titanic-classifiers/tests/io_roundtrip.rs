//! Integration tests for the CSV dataset reader and prediction writer.

use std::fs;

use titanic_classifiers::io::{
    load_dataset, load_dataset_with_config, read_predictions, write_predictions,
    DatasetReaderConfig,
};
use titanic_classifiers::math::Array1;

const TITANIC_SAMPLE: &str = "\
Survived,Pclass,Sex,Age,SibSp,Parch,Fare,Embarked
0,3,1,22,1,0,7.25,2
1,1,0,38,1,0,71.2833,0
1,3,0,26,0,0,7.925,2
1,1,0,35,1,0,53.1,2
0,3,1,35,0,0,8.05,2
";

#[test]
fn predictions_round_trip_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions.csv");
    let y_pred = Array1::from_vec(vec![0, 1, 1, 0, -2, 7]);

    write_predictions(&y_pred, &path, Some("Survived")).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Survived\n0\n1\n"));

    assert_eq!(read_predictions(&path, true).unwrap(), y_pred);
}

#[test]
fn predictions_round_trip_without_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions.tsv");
    let y_pred = Array1::from_vec(vec![3, 3, 1]);

    write_predictions(&y_pred, &path, None).unwrap();
    assert_eq!(read_predictions(&path, false).unwrap(), y_pred);
}

#[test]
fn loads_titanic_layout_with_label_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titanic_train.csv");
    fs::write(&path, TITANIC_SAMPLE).unwrap();

    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.n_samples(), 5);
    assert_eq!(ds.n_features(), 7);
    assert_eq!(ds.label_name, "Survived");
    assert_eq!(ds.feature_names[0], "Pclass");
    assert_eq!(ds.feature_names[6], "Embarked");
    assert_eq!(ds.y.to_vec(), vec![0, 1, 1, 1, 0]);
    assert_eq!(ds.x[(1, 5)], 71.2833);
}

#[test]
fn loads_headerless_file_with_custom_label_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, "1.5,2,1.0\n0.5,4,0\n").unwrap();

    let config = DatasetReaderConfig {
        has_header: false,
        label_column: 2,
        delimiter: None,
    };
    let ds = load_dataset_with_config(&path, &config).unwrap();
    assert_eq!(ds.feature_names, vec!["x0".to_string(), "x1".to_string()]);
    assert_eq!(ds.label_name, "y");
    assert_eq!(ds.y.to_vec(), vec![1, 0]);
    assert_eq!(ds.x.row_slice(1), &[0.5, 4.0]);
}

#[test]
fn malformed_row_reports_its_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "Survived,Age\n1,22\n0,abc\n").unwrap();

    let err = load_dataset(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("row 3"), "{:#}", err);
}

#[test]
fn missing_file_is_an_error() {
    assert!(load_dataset("/nonexistent/titanic_train.csv").is_err());
}

#[test]
fn loads_unlabeled_feature_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titanic_test.csv");
    fs::write(&path, "Pclass,Sex,Age\n3,1,34.5\n3,0,47\n").unwrap();

    let (x, names) = titanic_classifiers::io::load_features(&path, true).unwrap();
    assert_eq!(x.shape(), (2, 3));
    assert_eq!(names, vec!["Pclass", "Sex", "Age"]);
    assert_eq!(x[(0, 2)], 34.5);
}
