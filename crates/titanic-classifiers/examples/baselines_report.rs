use anyhow::{Context, Result};
use maud::html;

use titanic_classifiers::config::ModelType;
use titanic_classifiers::evaluation::{error, HoldoutConfig};
use titanic_classifiers::io::load_dataset;
use titanic_classifiers::models::factory::build_model;
use titanic_classifiers::report::plots::plot_feature_histogram;
use titanic_classifiers::report::{Report, ReportSection};

fn main() -> Result<()> {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .context("usage: baselines_report <titanic_train.csv>")?;

    let dataset = load_dataset(&path)?;
    dataset.log_summary();

    let holdout = HoldoutConfig::default();
    let mut rows = Vec::new();
    for model_type in [ModelType::MajorityVote, ModelType::random()] {
        let mut clf = build_model(&model_type);
        let estimate = error(&mut clf, &dataset, &holdout)?;
        println!(
            "{}: train {:.3}, test {:.3}",
            model_type, estimate.train_error, estimate.test_error
        );
        rows.push((model_type.to_string(), estimate));
    }

    let mut report = Report::new("titanic", env!("CARGO_PKG_VERSION"), "Baselines");
    let mut section = ReportSection::new("Baselines");
    section.add_content(html! {
        ul {
            @for (name, estimate) in &rows {
                li { (name) ": " (format!("{:.3} / {:.3}", estimate.train_error, estimate.test_error)) }
            }
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
    report.save_to_file("baselines_report.html")?;

    Ok(())
}
