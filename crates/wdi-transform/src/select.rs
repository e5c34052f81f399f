//! Validated lookups from requested countries to view columns and rows.
//!
//! Renderers never index a view positionally: every country is resolved by
//! name here, and a missing one is reported as `MissingCountry`.

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, DataFrame};

use wdi_ingest::column_f64_values;

use crate::error::{Result, TransformError};
use crate::frame::{country_columns, country_names, require_column};

/// One country's values from a transposed view, one per year row.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySeries {
    pub country: String,
    pub values: Vec<Option<f64>>,
}

impl CountrySeries {
    /// Non-null values.
    pub fn observed(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }
}

/// Resolves each requested country to its column in a transposed view,
/// preserving the requested order.
pub fn select_countries(transposed: &DataFrame, countries: &[String]) -> Result<Vec<CountrySeries>> {
    countries
        .iter()
        .map(|country| -> Result<CountrySeries> {
            let column = transposed
                .column(country)
                .map_err(|_| TransformError::MissingCountry {
                    country: country.clone(),
                    available: country_columns(transposed),
                })?;
            Ok(CountrySeries {
                country: country.clone(),
                values: column_f64_values(column)?,
            })
        })
        .collect()
}

/// Reads an axis column (normally `Years`) as whole years.
pub fn axis_years(df: &DataFrame, column: &str) -> Result<Vec<i32>> {
    column_f64_values(require_column(df, column)?)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .map(|year| year.round() as i32)
                .ok_or_else(|| TransformError::MissingValue {
                    column: column.to_string(),
                    row,
                })
        })
        .collect()
}

/// Keeps the rows of a transposed view whose `column` year is in `years`.
pub fn rows_for_years(df: &DataFrame, column: &str, years: &[i32]) -> Result<DataFrame> {
    let wanted: BTreeSet<i32> = years.iter().copied().collect();
    let mask: BooleanChunked = axis_years(df, column)?
        .into_iter()
        .map(|year| wanted.contains(&year))
        .collect();
    Ok(df.filter(&mask)?)
}

/// Looks up each requested country's row in a wide view and returns its value
/// for `year`, in the requested order.
pub fn country_values_at_year(
    wide: &DataFrame,
    countries: &[String],
    year: i32,
) -> Result<Vec<(String, Option<f64>)>> {
    let names = country_names(wide)?;
    let year_name = year.to_string();
    let column = wide
        .column(&year_name)
        .map_err(|_| TransformError::MissingYearColumn {
            year: year_name.clone(),
        })?;
    let values = column_f64_values(column)?;

    countries
        .iter()
        .map(|country| -> Result<(String, Option<f64>)> {
            let row = names.iter().position(|name| name == country).ok_or_else(|| {
                TransformError::MissingCountry {
                    country: country.clone(),
                    available: names.clone(),
                }
            })?;
            Ok((country.clone(), values[row]))
        })
        .collect()
}
