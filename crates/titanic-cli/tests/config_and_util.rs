//! Integration tests for CLI config parsing and util helpers.

use titanic_cli::config::{load_json_config, EvaluateConfig, PredictConfig};
use titanic_cli::util::{validate_tsv_or_csv_file, write_bytes_to_file};
use titanic_classifiers::config::ModelType;

// ---------------------------------------------------------------------------
// validate_tsv_or_csv_file
// ---------------------------------------------------------------------------

#[test]
fn validate_tsv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.tsv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_uppercase_csv_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titanic_train.CSV");
    write_bytes_to_file(&path, b"Survived\n1\n").unwrap();
    assert!(validate_tsv_or_csv_file(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(path.to_str().unwrap()).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_tsv_or_csv_file("/nonexistent/path/data.csv").is_err());
}

// ---------------------------------------------------------------------------
// EvaluateConfig / PredictConfig
// ---------------------------------------------------------------------------

#[test]
fn evaluate_config_serializes_to_json() {
    let cfg = EvaluateConfig::default();
    let json = serde_json::to_string_pretty(&cfg).unwrap();
    assert!(json.contains("\"holdout\""));
    assert!(json.contains("\"learning_curve\""));

    let back: EvaluateConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn predict_config_reads_model_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predict.json");
    std::fs::write(
        &path,
        r#"{ "model": { "k_neighbors": { "n_neighbors": 9 } }, "output_file": "out.tsv" }"#,
    )
    .unwrap();

    let cfg: PredictConfig = load_json_config(&path).unwrap();
    assert_eq!(cfg.model, ModelType::knn(9));
    assert_eq!(cfg.output_file, "out.tsv");
    assert!(!cfg.test_has_labels);
}

#[test]
fn model_type_unit_variant_is_a_plain_string() {
    let json = serde_json::to_string(&ModelType::MajorityVote).unwrap();
    assert_eq!(json, "\"majority_vote\"");
    let tree: ModelType =
        serde_json::from_str(r#"{ "decision_tree": { "criterion": "entropy", "max_depth": 3 } }"#)
            .unwrap();
    assert_eq!(tree, ModelType::entropy_tree(Some(3)));
}
