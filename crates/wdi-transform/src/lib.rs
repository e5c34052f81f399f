//! Reshaping for WDI indicator tables.
//!
//! Turns the raw table loaded by `wdi-ingest` into the views the charts draw
//! from:
//!
//! - **Wide view**: one row per country, one `Float64` column per year
//! - **Transposed view**: one row per year, one column per country, plus `Years`
//! - **Correlation table**: single-year columns per indicator joined on
//!   `Country Name`
//!
//! Country lookups go through [`select_countries`] and
//! [`country_values_at_year`], which fail with
//! [`TransformError::MissingCountry`] instead of reading the wrong column.

mod correlation;
mod error;
mod frame;
mod pipeline;
mod reshape;
mod select;
mod stats;

pub use correlation::{
    CorrelationMatrix, correlation_matrix, merging, numeric_columns, pearson, slicing_and_rename,
};
pub use error::{Result, TransformError};
pub use frame::{country_columns, country_names, is_numeric_dtype, require_column};
pub use pipeline::{ChartTables, build_chart_tables};
pub use reshape::{IndicatorViews, reshape_indicator, transposed_view, wide_view};
pub use select::{CountrySeries, axis_years, country_values_at_year, rows_for_years, select_countries};
pub use stats::{BoxStats, ColumnSummary, describe, quantile};
