//! CSV input and output.
pub mod dataset;
pub mod predictions;

pub use dataset::{load_dataset, load_dataset_with_config, load_features, DatasetReaderConfig};
pub use predictions::{read_predictions, write_predictions};

use std::path::Path;

/// Field delimiter inferred from the file extension: tab for `.tsv`,
/// comma otherwise.
pub fn delimiter_for<P: AsRef<Path>>(path: P) -> u8 {
    match path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("tsv") => b'\t',
        _ => b',',
    }
}
