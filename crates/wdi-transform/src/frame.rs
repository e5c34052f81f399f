//! DataFrame access helpers shared by the reshaping modules.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, DataType};
use wdi_ingest::column_string_values;
use wdi_model::{COUNTRY_NAME, YEARS};

use crate::error::{Result, TransformError};

/// Returns a column or a `MissingColumn` error.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::MissingColumn {
        column: name.to_string(),
    })
}

/// Country names of a wide-shaped table, in row order.
///
/// Every row must be named and names must be unique.
pub fn country_names(df: &DataFrame) -> Result<Vec<String>> {
    let values = column_string_values(require_column(df, COUNTRY_NAME)?)?;
    let mut seen = BTreeSet::new();
    let mut names = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        let name = value.ok_or(TransformError::UnnamedRow { row })?;
        if !seen.insert(name.clone()) {
            return Err(TransformError::DuplicateCountry { country: name });
        }
        names.push(name);
    }
    Ok(names)
}

/// Column names of a transposed view other than the year column.
pub fn country_columns(transposed: &DataFrame) -> Vec<String> {
    transposed
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| name != YEARS)
        .collect()
}

/// Numeric dtypes produced by the reshaping step.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}
