use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use titanic_cli::config::{EvaluateConfig, PredictConfig};
use titanic_cli::pipeline;

fn build_cli() -> Command {
    Command::new("titanic")
        .version(clap::crate_version!())
        .about("\u{1F6A2} Titanic survival classifiers: baselines, error estimation and sweeps")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("evaluate")
                .about("Run the full evaluation and write an HTML report")
                .arg(
                    Arg::new("config")
                        .help("Path to evaluation JSON configuration file. Defaults are used when omitted.")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to the labeled training data (*.csv or *.tsv). \
                             Overrides the data file specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Directory the report, results and effective config are written to.")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("trials")
                        .long("trials")
                        .value_parser(clap::value_parser!(usize))
                        .help("Number of random splits for the holdout and learning curve estimates."),
                )
                .arg(
                    Arg::new("test_size")
                        .long("test-size")
                        .value_parser(clap::value_parser!(f64))
                        .help("Fraction of the data held out in each holdout trial."),
                )
                .arg(
                    Arg::new("no_report")
                        .long("no-report")
                        .help("Disable HTML report generation.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Fit a model on the training data and write predictions")
                .arg(
                    Arg::new("config")
                        .help("Path to prediction JSON configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Path to the labeled training data (*.csv or *.tsv)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .help("Model to fit. Overrides the model in the configuration file.")
                        .value_parser(["majority", "random", "tree", "knn"])
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("test_data")
                        .short('t')
                        .long("test-data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Rows to predict for. Defaults to the training data.")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("test_has_labels")
                        .long("test-has-labels")
                        .help("The test data carries a label column, which is ignored.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Path to the output file for predictions (*.csv or *.tsv)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("TITANIC_LOG", "error,titanic=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("evaluate", sub_m)) => handle_evaluate(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_evaluate(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    match config_path {
        Some(path) => log::info!("[Titanic::Evaluate] Using config: {:?}", path),
        None => log::info!("[Titanic::Evaluate] No config provided; using defaults."),
    }

    let config = EvaluateConfig::from_arguments(config_path, matches)?;
    if config_path.is_none() {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    match pipeline::run_evaluation(&config) {
        Ok(summary) => {
            for row in &summary.training_errors {
                println!("{}\t-- training error: {:.3}", row.model, row.error);
            }
            for row in &summary.holdout_errors {
                println!(
                    "{}\t-- average training error: {:.3}, average test error: {:.3}",
                    row.model, row.estimate.train_error, row.estimate.test_error
                );
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Evaluation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    let config = PredictConfig::from_arguments(config_path, matches)?;
    if config_path.is_none() {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    match pipeline::run_prediction(&config) {
        Ok(n) => {
            log::info!(
                "[Titanic::Predict] Wrote {} predictions to {}",
                n,
                config.output_file
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
