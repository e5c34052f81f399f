//! Error types for reshaping.

use thiserror::Error;

use wdi_ingest::IngestError;

/// Errors raised while reshaping or combining indicator tables.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required column is absent.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// A year column of the requested range is absent from the source.
    #[error("year column '{year}' not found in source table")]
    MissingYearColumn { year: String },

    /// A requested country has no column (transposed view) or row (wide view).
    #[error("country '{country}' not found (available: {})", available.join(", "))]
    MissingCountry {
        country: String,
        available: Vec<String>,
    },

    /// The same country appears twice where names must be unique.
    #[error("country '{country}' appears more than once")]
    DuplicateCountry { country: String },

    /// Two value columns share a name.
    #[error("duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// A row has no country name.
    #[error("row {row} has no country name")]
    UnnamedRow { row: usize },

    /// A cell that must hold a value is empty.
    #[error("column '{column}' has no value at row {row}")]
    MissingValue { column: String, row: usize },

    /// The pipeline was asked for an indicator it did not reshape.
    #[error("indicator '{indicator}' was not reshaped")]
    UnknownIndicator { indicator: String },

    /// Merge called without inputs.
    #[error("no tables to merge")]
    NoTables,

    /// Value helper failure from the ingest layer.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
