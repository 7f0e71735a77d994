//! End-to-end evaluation and prediction runs behind the CLI subcommands.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped};
use plotly::common::Mode;
use serde::Serialize;

use titanic_classifiers::config::ModelType;
use titanic_classifiers::data_handling::Dataset;
use titanic_classifiers::evaluation::sweep::{
    holdout_sweep_series, learning_curve, learning_curve_series, sweep_cross_validation,
    sweep_with_holdout, HoldoutSweepPoint, LearningCurvePoint, SweepSeries,
};
use titanic_classifiers::evaluation::{error, error_rate, ErrorEstimate};
use titanic_classifiers::io::{load_dataset_with_config, load_features, write_predictions};
use titanic_classifiers::models::factory::build_model;
use titanic_classifiers::report::plots::{plot_feature_histogram, plot_learning_curve, plot_series};
use titanic_classifiers::report::{Report, ReportSection};

use crate::config::{EvaluateConfig, PredictConfig};
use crate::util::write_bytes_to_file;

const REPORT_FILE: &str = "titanic_report.html";
const CONFIG_FILE: &str = "titanic_config.json";
const RESULTS_FILE: &str = "titanic_results.json";

#[derive(Debug, Clone, Serialize)]
pub struct ModelError {
    pub model: String,
    pub error: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelHoldout {
    pub model: String,
    pub estimate: ErrorEstimate,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningCurveResult {
    pub model: String,
    pub points: Vec<LearningCurvePoint>,
}

/// Numbers produced by `run_evaluation`, in the order they are computed.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub training_errors: Vec<ModelError>,
    pub holdout_errors: Vec<ModelHoldout>,
    pub neighbor_sweep: SweepSeries,
    pub best_neighbors: Option<usize>,
    pub depth_sweep: Vec<HoldoutSweepPoint>,
    pub learning_curves: Vec<LearningCurveResult>,
}

/// Fit `model_type` on the whole dataset and score it on the same rows.
pub fn training_error(model_type: &ModelType, dataset: &Dataset) -> Result<f64> {
    let mut clf = build_model(model_type);
    clf.fit(&dataset.x, &dataset.y)?;
    let y_pred = clf.predict(&dataset.x)?;
    Ok(error_rate(&dataset.y, &y_pred)?)
}

/// Run every stage of the evaluation and write the results, the effective
/// configuration and (unless disabled) the HTML report to `output_dir`.
pub fn run_evaluation(config: &EvaluateConfig) -> Result<EvaluationSummary> {
    let start_time = Instant::now();
    let dataset = load_dataset_with_config(&config.data, &config.reader_config())?;
    dataset.log_summary();

    let output_dir = PathBuf::from(&config.output_dir);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    log::info!("Computing training errors...");
    let mut training_models = vec![
        ModelType::MajorityVote,
        config.random_model(),
        ModelType::entropy_tree(None),
    ];
    training_models.extend(config.training_error_neighbors.iter().map(|&k| ModelType::knn(k)));

    let mut training_errors = Vec::with_capacity(training_models.len());
    for model_type in &training_models {
        let err = training_error(model_type, &dataset)?;
        log::info!("{}: training error {:.3}", model_type, err);
        training_errors.push(ModelError {
            model: model_type.to_string(),
            error: err,
        });
    }

    log::info!(
        "Estimating holdout errors over {} trials (test size {})...",
        config.holdout.ntrials,
        config.holdout.test_size
    );
    let holdout_models = [
        ModelType::MajorityVote,
        config.random_model(),
        ModelType::entropy_tree(None),
        ModelType::knn(config.holdout_neighbors),
    ];
    let mut holdout_errors = Vec::with_capacity(holdout_models.len());
    for model_type in &holdout_models {
        let mut clf = build_model(model_type);
        let estimate = error(&mut clf, &dataset, &config.holdout)?;
        log::info!(
            "{}: average training error {:.3}, average test error {:.3}",
            model_type,
            estimate.train_error,
            estimate.test_error
        );
        holdout_errors.push(ModelHoldout {
            model: model_type.to_string(),
            estimate,
        });
    }

    log::info!("Finding the best k with {}-fold cross-validation...", config.cv_folds);
    let neighbor_sweep = sweep_cross_validation(
        "Validation Error",
        &config.neighbor_range,
        |k| build_model(&ModelType::knn(k)),
        &dataset,
        config.cv_folds,
    )?;
    let best_neighbors = neighbor_sweep.argmin().map(|(k, _)| k as usize);
    if let Some(k) = best_neighbors {
        log::info!("Lowest validation error at k = {}", k);
    }

    log::info!("Investigating tree depths...");
    let depth_sweep = sweep_with_holdout(
        "max_depth",
        &config.depth_range,
        |depth| build_model(&ModelType::entropy_tree(Some(depth))),
        &dataset,
        config.cv_folds,
        &config.holdout,
    )?;

    log::info!("Investigating training set sizes...");
    let mut learning_curves = Vec::with_capacity(2);
    for model_type in [
        ModelType::knn(config.learning_curve_neighbors),
        ModelType::entropy_tree(Some(config.learning_curve_depth)),
    ] {
        let mut clf = build_model(&model_type);
        let points = learning_curve(&mut clf, &dataset, &config.learning_curve)?;
        learning_curves.push(LearningCurveResult {
            model: model_type.short_name().to_uppercase(),
            points,
        });
    }

    let summary = EvaluationSummary {
        training_errors,
        holdout_errors,
        neighbor_sweep,
        best_neighbors,
        depth_sweep,
        learning_curves,
    };
    log::info!("Evaluation completed in {:?}", start_time.elapsed());

    if config.report {
        let report = build_report(config, &dataset, &summary)?;
        report.save_to_file(output_dir.join(REPORT_FILE))?;
    }

    let bytes = serde_json::to_vec_pretty(&summary)?;
    write_bytes_to_file(output_dir.join(RESULTS_FILE), &bytes)
        .with_context(|| format!("Failed to write {}", RESULTS_FILE))?;

    let bytes = serde_json::to_vec_pretty(config)?;
    write_bytes_to_file(output_dir.join(CONFIG_FILE), &bytes)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
    log::info!("Results written to {:?}", output_dir);

    Ok(summary)
}

fn error_table(rows: &[ModelError]) -> Markup {
    html! {
        table {
            tr { th { "Model" } th { "Training error" } }
            @for row in rows {
                tr { td { (row.model) } td { (format!("{:.3}", row.error)) } }
            }
        }
    }
}

fn holdout_table(rows: &[ModelHoldout]) -> Markup {
    html! {
        table {
            tr { th { "Model" } th { "Average training error" } th { "Average test error" } }
            @for row in rows {
                tr {
                    td { (row.model) }
                    td { (format!("{:.3}", row.estimate.train_error)) }
                    td { (format!("{:.3}", row.estimate.test_error)) }
                }
            }
        }
    }
}

fn build_report(
    config: &EvaluateConfig,
    dataset: &Dataset,
    summary: &EvaluationSummary,
) -> Result<Report> {
    let mut report = Report::new("titanic", &config.version, "Titanic Classifier Evaluation");

    /* Section 1: Features */
    {
        let mut section = ReportSection::new("Features");
        section.add_content(html! {
            p {
                (dataset.n_samples()) " examples with " (dataset.n_features())
                " features, split by " (dataset.label_name) "."
            }
        });
        for (col, name) in dataset.feature_names.iter().enumerate() {
            let plot = plot_feature_histogram(
                &dataset.feature_column(col),
                &dataset.y,
                name,
                &dataset.label_name,
            )
            .map_err(anyhow::Error::msg)?;
            section.add_plot(plot);
        }
        report.add_section(section);
    }

    /* Section 2: Baselines and training error */
    {
        let mut section = ReportSection::new("Training Error");
        section.add_content(error_table(&summary.training_errors));
        report.add_section(section);
    }

    /* Section 3: Repeated holdout */
    {
        let mut section = ReportSection::new("Holdout Error");
        section.add_content(html! {
            p {
                "Averaged over " (config.holdout.ntrials) " random splits holding out "
                (format!("{:.0}%", config.holdout.test_size * 100.0)) " of the data."
            }
        });
        section.add_content(holdout_table(&summary.holdout_errors));
        report.add_section(section);
    }

    /* Section 4: Sweeps */
    {
        let mut section = ReportSection::new("Hyperparameter Sweeps");
        if let Some(k) = summary.best_neighbors {
            section.add_content(html! { p { "Lowest validation error at k = " (k) "." } });
        }
        section.add_plot(plot_series(
            std::slice::from_ref(&summary.neighbor_sweep),
            "Validation Score Error vs k Neighbors",
            "k neighbors",
            "Validation Score Error",
            Mode::Markers,
        ));
        section.add_plot(plot_series(
            &holdout_sweep_series(&summary.depth_sweep),
            "Error Comparison vs. Max Depth",
            "Max Depth",
            "Error",
            Mode::Lines,
        ));
        report.add_section(section);
    }

    /* Section 5: Learning curves */
    {
        let mut section = ReportSection::new("Learning Curve");
        let series: Vec<SweepSeries> = summary
            .learning_curves
            .iter()
            .flat_map(|curve| learning_curve_series(&curve.model, &curve.points))
            .collect();
        section.add_plot(plot_learning_curve(&series));
        report.add_section(section);
    }

    /* Section 6: Configuration */
    {
        let mut section = ReportSection::new("Configuration");
        section.add_content(html! {
            style {
                ".code-container {
                    background-color: #f5f5f5;
                    padding: 10px;
                    border-radius: 5px;
                    overflow-x: auto;
                    font-family: monospace;
                    white-space: pre-wrap;
                }"
            }
            div class="code-container" {
                pre {
                    code { (PreEscaped(serde_json::to_string_pretty(config)?)) }
                }
            }
        });
        report.add_section(section);
    }

    Ok(report)
}

/// Fit the configured model on the training data and write one prediction
/// per row of the test data (or of the training data when none is given).
pub fn run_prediction(config: &PredictConfig) -> Result<usize> {
    let train = load_dataset_with_config(&config.data, &config.reader_config())?;

    let mut clf = build_model(&config.model);
    log::info!("Fitting {} on {} examples", config.model, train.n_samples());
    clf.fit(&train.x, &train.y)?;

    let x_test = match &config.test_data {
        Some(path) if config.test_has_labels => {
            load_dataset_with_config(path, &config.reader_config())?.x
        }
        Some(path) => {
            let (x, names) = load_features(path, config.has_header)?;
            if config.has_header && names != train.feature_names {
                log::warn!(
                    "Test columns {:?} differ from training columns {:?}",
                    names,
                    train.feature_names
                );
            }
            x
        }
        None => train.x.clone(),
    };

    let y_pred = clf.predict(&x_test)?;
    write_predictions(&y_pred, Path::new(&config.output_file), Some(train.label_name.as_str()))?;
    Ok(y_pred.len())
}
