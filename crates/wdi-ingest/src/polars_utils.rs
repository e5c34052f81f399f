//! Polars AnyValue and column utility functions.
//!
//! Conversions used by the reshaping step to read string-typed source cells
//! as numbers and names, and by the CSV writer to format cells.

use polars::prelude::{AnyValue, Column, DataType};

use crate::error::Result;

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Parses a string as f64, returning None for invalid, empty or non-finite
/// strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a column as optional f64 values.
///
/// String columns are parsed cell by cell (unparseable cells become None);
/// any other dtype is cast to Float64.
pub fn column_f64_values(column: &Column) -> Result<Vec<Option<f64>>> {
    if column.dtype() == &DataType::String {
        let values = column.str()?.iter().map(|cell| cell.and_then(parse_f64)).collect();
        return Ok(values);
    }
    let cast = column.cast(&DataType::Float64)?;
    Ok(cast.f64()?.iter().map(|v| v.filter(|v| v.is_finite())).collect())
}

/// Reads a column as optional strings, text unchanged; empty cells are None.
pub fn column_string_values(column: &Column) -> Result<Vec<Option<String>>> {
    let cast = column.cast(&DataType::String)?;
    let values = cast
        .str()?
        .iter()
        .map(|cell| cell.filter(|value| !value.is_empty()).map(str::to_string))
        .collect();
    Ok(values)
}
