use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

/// A titled block of HTML content and plots.
pub struct ReportSection {
    title: String,
    content: Vec<Markup>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        ReportSection {
            title: title.to_string(),
            content: Vec::new(),
        }
    }

    pub fn add_content(&mut self, content: Markup) {
        self.content.push(content);
    }

    /// Embed `plot` as an inline plotly div.
    pub fn add_plot(&mut self, plot: Plot) {
        let div_id = format!(
            "{}-plot-{}",
            self.title.to_lowercase().replace(' ', "-"),
            self.content.len()
        );
        self.content
            .push(PreEscaped(plot.to_inline_html(Some(div_id.as_str()))));
    }

    fn render(&self) -> Markup {
        html! {
            section class="report-section" {
                h2 { (self.title) }
                @for block in &self.content {
                    div class="report-block" { (block) }
                }
            }
        }
    }
}

/// Single-page HTML report made of sections.
pub struct Report {
    software: String,
    version: String,
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(software: &str, version: &str, title: &str) -> Self {
        Report {
            software: software.to_string(),
            version: version.to_string(),
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn render(&self) -> Markup {
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style {
                        "body { font-family: sans-serif; margin: 2em; }
                        .report-section { margin-bottom: 2em; }
                        table { border-collapse: collapse; }
                        td, th { border: 1px solid #ccc; padding: 4px 8px; text-align: right; }"
                    }
                }
                body {
                    h1 { (self.title) }
                    p class="meta" {
                        (self.software) " " (self.version) " | generated " (generated)
                    }
                    @for section in &self.sections {
                        (section.render())
                    }
                }
            }
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render().into_string())
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_report_contains_sections_and_content() {
        let mut report = Report::new("titanic", "0.1.0", "Evaluation Report");
        let mut section = ReportSection::new("Baselines");
        section.add_content(html! { p { "Majority vote training error: 0.384" } });
        section.add_plot(Plot::new());
        report.add_section(section);

        let page = report.render().into_string();
        assert!(page.contains("<h1>Evaluation Report</h1>"));
        assert!(page.contains("<h2>Baselines</h2>"));
        assert!(page.contains("Majority vote training error: 0.384"));
        assert!(page.contains("baselines-plot-1"));
    }
}
