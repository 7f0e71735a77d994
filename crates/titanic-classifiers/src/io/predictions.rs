//! Writing and reading one-label-per-row prediction files.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data_handling::Label;
use crate::io::delimiter_for;
use crate::math::Array1;

/// Write predictions one per row, preceded by `header` when given.
pub fn write_predictions<P: AsRef<Path>>(
    y_pred: &Array1<Label>,
    output_path: P,
    header: Option<&str>,
) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_for(path))
        .from_writer(BufWriter::new(file));

    if let Some(name) = header {
        writer.write_record([name])?;
    }
    for label in y_pred.iter() {
        writer.write_record([label.to_string()])?;
    }

    writer.flush()?;
    log::info!("Wrote {} predictions to {:?}", y_pred.len(), path);
    Ok(())
}

/// Read a prediction file written by `write_predictions`.
pub fn read_predictions<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Array1<Label>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(has_header)
        .from_path(path)
        .with_context(|| format!("Failed to open predictions: {:?}", path))?;

    let mut labels = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        let field = record.get(0).unwrap_or("");
        labels.push(
            field
                .trim()
                .parse::<Label>()
                .with_context(|| format!("Invalid label '{}' at row {}", field, row_idx + 1))?,
        );
    }
    Ok(Array1::from_vec(labels))
}
