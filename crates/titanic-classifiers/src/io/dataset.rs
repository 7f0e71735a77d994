//! CSV/TSV dataset reader.
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::data_handling::{Dataset, Label};
use crate::io::delimiter_for;
use crate::math::{Array1, Array2};

/// Configuration for reading a labeled dataset.
#[derive(Debug, Clone)]
pub struct DatasetReaderConfig {
    /// Whether the first row holds column names.
    pub has_header: bool,
    /// Zero-based index of the label column; every other column is a feature.
    pub label_column: usize,
    /// Field delimiter. When `None` it is inferred from the file extension.
    pub delimiter: Option<u8>,
}

impl Default for DatasetReaderConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            label_column: 0,
            delimiter: None,
        }
    }
}

/// Read a CSV with a header row whose first column is the label.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    load_dataset_with_config(path, &DatasetReaderConfig::default())
}

/// Read a labeled dataset using a custom configuration.
pub fn load_dataset_with_config<P: AsRef<Path>>(
    path: P,
    config: &DatasetReaderConfig,
) -> Result<Dataset> {
    let path = path.as_ref();
    let delimiter = config.delimiter.unwrap_or_else(|| delimiter_for(path));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(config.has_header)
        .from_path(path)
        .with_context(|| format!("Failed to open dataset: {}", path.display()))?;

    let header: Option<Vec<String>> = if config.has_header {
        let headers = reader
            .headers()
            .context("Failed to read dataset header row")?;
        Some(headers.iter().map(|h| h.trim().to_string()).collect())
    } else {
        None
    };

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<Label> = Vec::new();
    let mut n_columns = header.as_ref().map(|h| h.len());

    for (row_idx, result) in reader.records().enumerate() {
        let line = row_idx + 1 + usize::from(config.has_header);
        let record = result.with_context(|| format!("Failed to read row {}", line))?;

        let width = *n_columns.get_or_insert(record.len());
        if record.len() != width {
            bail!(
                "Row {} has {} columns, expected {}",
                line,
                record.len(),
                width
            );
        }
        if config.label_column >= width {
            bail!(
                "Label column {} out of range for {} columns",
                config.label_column,
                width
            );
        }

        let mut features = Vec::with_capacity(width - 1);
        for (col, field) in record.iter().enumerate() {
            if col == config.label_column {
                labels.push(
                    parse_label(field)
                        .with_context(|| format!("Invalid label at row {}", line))?,
                );
            } else {
                features.push(field.trim().parse::<f64>().with_context(|| {
                    format!("Invalid feature value '{}' at row {}, column {}", field, line, col)
                })?);
            }
        }
        rows.push(features);
    }

    let n_columns = n_columns.ok_or_else(|| anyhow!("Dataset {} is empty", path.display()))?;
    if config.label_column >= n_columns {
        bail!(
            "Label column {} out of range for {} columns",
            config.label_column,
            n_columns
        );
    }

    let (feature_names, label_name) = match header {
        Some(names) => {
            let label_name = names[config.label_column].clone();
            let features = names
                .into_iter()
                .enumerate()
                .filter(|(i, _)| *i != config.label_column)
                .map(|(_, name)| name)
                .collect();
            (features, label_name)
        }
        None => (
            (0..n_columns - 1).map(|i| format!("x{}", i)).collect(),
            "y".to_string(),
        ),
    };

    let n_rows = rows.len();
    let x = if n_rows == 0 {
        Array2::from_shape_vec((0, n_columns - 1), Vec::new())?
    } else {
        Array2::from_rows(rows)?
    };
    let dataset = Dataset::new(x, Array1::from_vec(labels), feature_names, label_name)?;

    log::info!(
        "Loaded {} examples with {} features from {}",
        dataset.n_samples(),
        dataset.n_features(),
        path.display()
    );
    Ok(dataset)
}

/// Read an unlabeled feature table, e.g. the rows to predict for.
///
/// Returns the feature matrix and the column names (`x0`, `x1`, ... when the
/// file has no header).
pub fn load_features<P: AsRef<Path>>(
    path: P,
    has_header: bool,
) -> Result<(Array2<f64>, Vec<String>)> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(has_header)
        .from_path(path)
        .with_context(|| format!("Failed to open feature file: {}", path.display()))?;

    let names: Option<Vec<String>> = if has_header {
        let headers = reader.headers().context("Failed to read header row")?;
        Some(headers.iter().map(|h| h.trim().to_string()).collect())
    } else {
        None
    };

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let line = row_idx + 1 + usize::from(has_header);
        let record = result.with_context(|| format!("Failed to read row {}", line))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col, field)| {
                field.trim().parse::<f64>().with_context(|| {
                    format!("Invalid feature value '{}' at row {}, column {}", field, line, col)
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        bail!("Feature file {} has no rows", path.display());
    }
    let x = Array2::from_rows(rows)?;
    let names = names.unwrap_or_else(|| (0..x.ncols()).map(|i| format!("x{}", i)).collect());
    if names.len() != x.ncols() {
        bail!(
            "Header has {} columns but rows have {}",
            names.len(),
            x.ncols()
        );
    }

    log::info!(
        "Loaded {} rows with {} features from {}",
        x.nrows(),
        x.ncols(),
        path.display()
    );
    Ok((x, names))
}

/// Integer label; floats with no fractional part (e.g. `1.0`) are accepted.
fn parse_label(field: &str) -> Result<Label> {
    let field = field.trim();
    if let Ok(label) = field.parse::<Label>() {
        return Ok(label);
    }
    let value = field
        .parse::<f64>()
        .with_context(|| format!("'{}' is not a number", field))?;
    if value.fract() != 0.0 || !value.is_finite() {
        bail!("'{}' is not an integer class label", field);
    }
    Ok(value as Label)
}
