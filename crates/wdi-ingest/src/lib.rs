//! WDI data ingestion utilities.
//!
//! Loads World Bank "World Development Indicators" CSV exports into Polars
//! DataFrames.
//!
//! # Features
//!
//! - **CSV Loading**: skip the export preamble, read the header and every
//!   record as nullable strings
//! - **CSV Export**: write any DataFrame back out as CSV
//! - **File Checks**: size limit and UTF-16 detection before loading
//! - **Inspection**: list indicators, find duplicated (country, indicator) rows
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wdi_ingest::{list_indicators, read_indicator_csv};
//!
//! let raw = read_indicator_csv(Path::new("API_19_DS2_en_csv_v2.csv"), 4)?;
//! let indicators = list_indicators(&raw)?;
//! ```

mod csv;
mod error;
mod indicators;
mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CsvHeaders, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit,
    normalize_header, read_csv_schema, read_indicator_csv, validate_encoding, write_csv_table,
};

// === Inspection ===
pub use indicators::{DuplicatePair, check_unique_pairs, list_indicators};

// === Value Helpers ===
pub use polars_utils::{
    any_to_string, column_f64_values, column_string_values, format_numeric, parse_f64,
};
