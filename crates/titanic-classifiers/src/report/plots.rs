use plotly::common::Mode;
use plotly::histogram::Bins;
use plotly::layout::{Axis, BarMode, Layout};
use plotly::{Histogram, Plot, Scatter};

use crate::data_handling::Label;
use crate::evaluation::sweep::SweepSeries;
use crate::math::Array1;

/// Bin layout for a feature histogram.
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramBins {
    /// One unit-wide bin per integer in `start..=end`, centred on the integer.
    Integer { start: i64, end: i64 },
    /// Let plotly pick this many equal-width bins.
    Auto(usize),
}

/// Integer-aligned bins when the feature takes fewer than 10 distinct values
/// that are exactly the integers `floor(min)..=ceil(max)`; 10 automatic
/// bins otherwise.
pub fn histogram_bins(values: &[f64]) -> HistogramBins {
    let mut distinct: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    distinct.sort_by(|a, b| a.total_cmp(b));
    distinct.dedup();

    let (Some(&min), Some(&max)) = (distinct.first(), distinct.last()) else {
        return HistogramBins::Auto(10);
    };

    let start = min.floor() as i64;
    let end = max.ceil() as i64;
    let is_integer_range = distinct.len() < 10
        && distinct.len() as i64 == end - start + 1
        && distinct
            .iter()
            .zip(start..=end)
            .all(|(v, expected)| *v == expected as f64);

    if is_integer_range {
        HistogramBins::Integer { start, end }
    } else {
        HistogramBins::Auto(10)
    }
}

/// Overlaid per-class histograms of one feature.
pub fn plot_feature_histogram(
    values: &Array1<f64>,
    labels: &Array1<Label>,
    x_name: &str,
    y_name: &str,
) -> Result<Plot, String> {
    if values.len() != labels.len() {
        return Err(format!(
            "Feature values ({}) and labels ({}) must have the same length",
            values.len(),
            labels.len()
        ));
    }

    let mut classes = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();

    let bins = histogram_bins(values.as_slice());
    let mut plot = Plot::new();

    for class in classes {
        let data: Vec<f64> = values
            .iter()
            .zip(labels.iter())
            .filter(|(_, l)| **l == class)
            .map(|(v, _)| *v)
            .collect();

        let trace = Histogram::new(data)
            .name(format!("{} = {}", y_name, class).as_str())
            .opacity(0.5);
        let trace = match bins {
            HistogramBins::Integer { start, end } => {
                trace.x_bins(Bins::new(start as f64 - 0.5, end as f64 + 0.5, 1.0))
            }
            HistogramBins::Auto(n) => trace.n_bins_x(n),
        };
        plot.add_trace(trace);
    }

    plot.set_layout(
        Layout::new()
            .title(format!("{} by {}", x_name, y_name).as_str())
            .bar_mode(BarMode::Overlay)
            .x_axis(Axis::new().title(x_name))
            .y_axis(Axis::new().title("Frequency")),
    );

    Ok(plot)
}

/// Plot one or more series against a shared x axis.
pub fn plot_series(
    series: &[SweepSeries],
    title: &str,
    x_title: &str,
    y_title: &str,
    mode: Mode,
) -> Plot {
    let mut plot = Plot::new();
    for s in series {
        plot.add_trace(
            Scatter::new(s.xs(), s.ys())
                .mode(mode.clone())
                .name(s.name.as_str()),
        );
    }
    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title(x_title))
            .y_axis(Axis::new().title(y_title)),
    );
    plot
}

/// Scatter of training and test error against the fraction of training
/// data used, one pair of traces per model.
pub fn plot_learning_curve(series: &[SweepSeries]) -> Plot {
    plot_series(
        series,
        "Error vs. Percentage of Training Data Used",
        "Percentage of Training Data Used",
        "Error",
        Mode::Markers,
    )
}
