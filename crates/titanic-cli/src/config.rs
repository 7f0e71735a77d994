use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use titanic_classifiers::config::{ModelType, DEFAULT_RANDOM_SEED};
use titanic_classifiers::evaluation::sweep::LearningCurveConfig;
use titanic_classifiers::evaluation::HoldoutConfig;
use titanic_classifiers::io::DatasetReaderConfig;

use crate::util::validate_tsv_or_csv_file;

/// Settings for `titanic evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluateConfig {
    pub version: String,
    pub data: String,
    pub has_header: bool,
    pub label_column: usize,
    pub output_dir: String,
    pub holdout: HoldoutConfig,
    pub cv_folds: usize,
    /// `k` values whose training error is reported.
    pub training_error_neighbors: Vec<usize>,
    /// `k` used for the holdout comparison.
    pub holdout_neighbors: usize,
    pub random_seed: u64,
    pub random_max_classes: usize,
    pub neighbor_range: Vec<usize>,
    pub depth_range: Vec<usize>,
    pub learning_curve: LearningCurveConfig,
    pub learning_curve_neighbors: usize,
    pub learning_curve_depth: usize,
    pub report: bool,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        EvaluateConfig {
            version: clap::crate_version!().to_string(),
            data: String::from("titanic_train.csv"),
            has_header: true,
            label_column: 0,
            output_dir: String::from("titanic_report"),
            holdout: HoldoutConfig::default(),
            cv_folds: 10,
            training_error_neighbors: vec![3, 5, 7],
            holdout_neighbors: 5,
            random_seed: DEFAULT_RANDOM_SEED,
            random_max_classes: 2,
            neighbor_range: (1..=50).collect(),
            depth_range: (1..=20).collect(),
            learning_curve: LearningCurveConfig::default(),
            learning_curve_neighbors: 7,
            learning_curve_depth: 3,
            report: true,
        }
    }
}

impl EvaluateConfig {
    /// Load the JSON config at `config_path` (defaults when `None`) and
    /// apply the command line overrides on top.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_json_config::<EvaluateConfig>(path)?,
            None => EvaluateConfig::default(),
        };

        if let Some(data) = matches.get_one::<String>("data") {
            config.data = data.clone();
        }
        validate_tsv_or_csv_file(&config.data)?;

        if let Some(output_dir) = matches.get_one::<String>("output_dir") {
            config.output_dir = output_dir.clone();
        }

        if let Some(trials) = matches.get_one::<usize>("trials") {
            config.holdout.ntrials = *trials;
            config.learning_curve.ntrials = *trials;
        }

        if let Some(test_size) = matches.get_one::<f64>("test_size") {
            config.holdout.test_size = *test_size;
        }

        if matches.get_flag("no_report") {
            config.report = false;
        }

        Ok(config)
    }

    pub fn reader_config(&self) -> DatasetReaderConfig {
        DatasetReaderConfig {
            has_header: self.has_header,
            label_column: self.label_column,
            delimiter: None,
        }
    }

    pub fn random_model(&self) -> ModelType {
        ModelType::Random {
            seed: self.random_seed,
            max_classes: self.random_max_classes,
        }
    }
}

/// Settings for `titanic predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictConfig {
    pub data: String,
    pub test_data: Option<String>,
    pub has_header: bool,
    pub label_column: usize,
    /// Whether `test_data` carries a label column at `label_column`.
    pub test_has_labels: bool,
    pub model: ModelType,
    pub output_file: String,
}

impl Default for PredictConfig {
    fn default() -> Self {
        PredictConfig {
            data: String::from("titanic_train.csv"),
            test_data: None,
            has_header: true,
            label_column: 0,
            test_has_labels: false,
            model: ModelType::entropy_tree(Some(3)),
            output_file: String::from("titanic_predictions.csv"),
        }
    }
}

impl PredictConfig {
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_json_config::<PredictConfig>(path)?,
            None => PredictConfig::default(),
        };

        if let Some(data) = matches.get_one::<String>("data") {
            config.data = data.clone();
        }
        validate_tsv_or_csv_file(&config.data)?;

        if let Some(test_data) = matches.get_one::<String>("test_data") {
            config.test_data = Some(test_data.clone());
        }
        if let Some(test_data) = &config.test_data {
            validate_tsv_or_csv_file(test_data)?;
        }

        if matches.get_flag("test_has_labels") {
            config.test_has_labels = true;
        }

        if let Some(model) = matches.get_one::<String>("model") {
            config.model = ModelType::from_str(model).map_err(anyhow::Error::msg)?;
        }

        if let Some(output_file) = matches.get_one::<String>("output_file") {
            config.output_file = output_file.clone();
        }

        Ok(config)
    }

    pub fn reader_config(&self) -> DatasetReaderConfig {
        DatasetReaderConfig {
            has_header: self.has_header,
            label_column: self.label_column,
            delimiter: None,
        }
    }
}

/// Parse a JSON config file; fields it omits keep their defaults.
pub fn load_json_config<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))
}
