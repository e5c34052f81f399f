//! Wide and transposed views of a single indicator.
//!
//! The wide view keeps one row per country (source order) and one `Float64`
//! column per year. The transposed view flips it: one row per year, one
//! column per country, plus a numeric `Years` column.

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use wdi_ingest::column_f64_values;
use wdi_model::{COUNTRY_NAME, INDICATOR_NAME, YEARS, YearRange};

use crate::error::{Result, TransformError};
use crate::frame::{country_names, require_column};

/// Both views of one indicator.
#[derive(Debug, Clone)]
pub struct IndicatorViews {
    pub indicator: String,
    pub wide: DataFrame,
    pub transposed: DataFrame,
}

/// Filters the raw table to one indicator and a set of countries, keeping
/// `Country Name` and the year columns of `years`.
///
/// Matching is exact. Rows keep their source order regardless of the order of
/// `countries`. An indicator with no rows yields an empty table; requested
/// countries without a row are left out.
pub fn wide_view(
    raw: &DataFrame,
    indicator: &str,
    countries: &[String],
    years: &YearRange,
) -> Result<DataFrame> {
    let country_column = require_column(raw, COUNTRY_NAME)?.cast(&DataType::String)?;
    let indicator_column = require_column(raw, INDICATOR_NAME)?.cast(&DataType::String)?;
    let year_columns = years.column_names();
    for year in &year_columns {
        if raw.column(year).is_err() {
            return Err(TransformError::MissingYearColumn { year: year.clone() });
        }
    }

    let wanted: BTreeSet<&str> = countries.iter().map(String::as_str).collect();
    let mask: BooleanChunked = country_column
        .str()?
        .iter()
        .zip(indicator_column.str()?.iter())
        .map(|(country, name)| {
            name == Some(indicator) && country.is_some_and(|country| wanted.contains(country))
        })
        .collect();
    let filtered = raw.filter(&mask)?;

    let mut columns: Vec<Column> = Vec::with_capacity(year_columns.len() + 1);
    columns.push(require_column(&filtered, COUNTRY_NAME)?.cast(&DataType::String)?);
    for year in &year_columns {
        let values = column_f64_values(require_column(&filtered, year)?)?;
        columns.push(Series::new(year.as_str().into(), values).into_column());
    }
    let wide = DataFrame::new(columns)?;

    if wide.height() < wanted.len() {
        let found: BTreeSet<String> = country_names(&wide)?.into_iter().collect();
        let missing: Vec<&str> = wanted
            .iter()
            .copied()
            .filter(|country| !found.contains(*country))
            .collect();
        debug!(
            indicator,
            missing = ?missing,
            "requested countries without a row"
        );
    }
    Ok(wide)
}

/// Transposes a wide view: one row per year of `years`, one `Float64` column
/// per country (wide row order), then an `Int32` `Years` column.
///
/// The row index is implicit and 0-based. With an empty wide view the result
/// still has one row per year and only the `Years` column.
pub fn transposed_view(wide: &DataFrame, years: &YearRange) -> Result<DataFrame> {
    let names = country_names(wide)?;
    let mut year_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(years.len());
    for year in years.column_names() {
        let column = wide
            .column(&year)
            .map_err(|_| TransformError::MissingYearColumn { year: year.clone() })?;
        year_values.push(column_f64_values(column)?);
    }

    let mut columns: Vec<Column> = Vec::with_capacity(names.len() + 1);
    for (row, name) in names.iter().enumerate() {
        let values: Vec<Option<f64>> = year_values.iter().map(|column| column[row]).collect();
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }
    columns.push(Series::new(YEARS.into(), years.years()).into_column());
    Ok(DataFrame::new(columns)?)
}

/// Produces the wide and transposed views for one indicator.
pub fn reshape_indicator(
    raw: &DataFrame,
    indicator: &str,
    countries: &[String],
    years: &YearRange,
) -> Result<IndicatorViews> {
    let wide = wide_view(raw, indicator, countries, years)?;
    let transposed = transposed_view(&wide, years)?;
    debug!(
        indicator,
        countries = wide.height(),
        years = transposed.height(),
        "reshaped indicator"
    );
    Ok(IndicatorViews {
        indicator: indicator.to_string(),
        wide,
        transposed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table() -> DataFrame {
        let mut columns = vec![
            Series::new(COUNTRY_NAME.into(), vec!["Nepal", "Algeria", "Nepal"]).into_column(),
            Series::new(INDICATOR_NAME.into(), vec!["Pop", "Pop", "CO2"]).into_column(),
        ];
        for (offset, year) in (2012..=2020).enumerate() {
            let base = offset as f64;
            let cells = vec![
                Some(format!("{}", base + 1.0)),
                Some(format!("{}", base + 10.0)),
                None,
            ];
            columns.push(Series::new(year.to_string().as_str().into(), cells).into_column());
        }
        DataFrame::new(columns).unwrap()
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn wide_view_keeps_name_and_year_columns() {
        let wide = wide_view(
            &raw_table(),
            "Pop",
            &names(&["Algeria", "Nepal"]),
            &YearRange::default(),
        )
        .unwrap();
        assert_eq!(wide.height(), 2);
        assert_eq!(wide.width(), 10);
        assert_eq!(wide.column("2012").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn unknown_indicator_gives_empty_views() {
        let views = reshape_indicator(
            &raw_table(),
            "GDP",
            &names(&["Algeria"]),
            &YearRange::default(),
        )
        .unwrap();
        assert_eq!(views.wide.height(), 0);
        assert_eq!(views.transposed.height(), 9);
        assert_eq!(views.transposed.width(), 1);
    }

    #[test]
    fn missing_year_column_is_a_hard_failure() {
        let result = wide_view(
            &raw_table(),
            "Pop",
            &names(&["Algeria"]),
            &YearRange::new(2011, 2020).unwrap(),
        );
        assert!(matches!(
            result,
            Err(TransformError::MissingYearColumn { ref year }) if year == "2011"
        ));
    }

    #[test]
    fn null_source_cells_stay_null() {
        let views = reshape_indicator(
            &raw_table(),
            "CO2",
            &names(&["Nepal"]),
            &YearRange::default(),
        )
        .unwrap();
        let nepal = views.transposed.column("Nepal").unwrap().f64().unwrap();
        assert_eq!(nepal.null_count(), 9);
    }

    #[test]
    fn transposed_columns_follow_wide_row_order() {
        let views = reshape_indicator(
            &raw_table(),
            "Pop",
            &names(&["Algeria", "Nepal"]),
            &YearRange::default(),
        )
        .unwrap();
        let columns: Vec<String> = views
            .transposed
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(columns, vec!["Nepal", "Algeria", "Years"]);
        let algeria = views.transposed.column("Algeria").unwrap().f64().unwrap();
        assert_eq!(algeria.get(0), Some(10.0));
        assert_eq!(algeria.get(8), Some(18.0));
    }
}
