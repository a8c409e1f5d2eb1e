//! Fatal startup errors
//!
//! Everything here aborts startup. Query-time problems are never errors:
//! an out-of-range date yields an empty report and a zero baseline yields
//! `Growth::Undefined`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("unparseable truckout date at row {row}: '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("invalid quantity at row {row}: '{value}' (expected a non-negative number)")]
    InvalidQuantity { row: usize, value: String },

    #[error("empty destination region at row {row}")]
    EmptyRegion { row: usize },

    #[error("invalid geography file: {0}")]
    InvalidGeography(String),

    #[error("invalid region centroid file: {0}")]
    InvalidCentroids(String),
}

impl LoadError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
