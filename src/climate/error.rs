use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateLoadError {
    #[error("Failed to read climate CSV '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Unparsable DATE value {value:?} on row {row} of '{path}'")]
    DateParse {
        path: PathBuf,
        row: usize,
        value: Option<String>,
    },

    #[error("Column '{column}' in '{path}' is not numeric")]
    NonNumericColumn {
        path: PathBuf,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
