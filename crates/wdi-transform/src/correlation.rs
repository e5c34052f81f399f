//! Correlation input tables and the Pearson matrix built from them.
//!
//! Each indicator contributes one single-year column (`slicing_and_rename`);
//! the columns are joined on `Country Name` (`merging`) and the numeric
//! columns of the result feed `correlation_matrix`.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use wdi_ingest::column_f64_values;
use wdi_model::COUNTRY_NAME;

use crate::error::{Result, TransformError};
use crate::frame::{country_names, is_numeric_dtype, require_column};

/// Projects a wide view to `Country Name` and one year, renaming the year
/// column to `label`.
pub fn slicing_and_rename(wide: &DataFrame, year: i32, label: &str) -> Result<DataFrame> {
    if label == COUNTRY_NAME {
        return Err(TransformError::DuplicateColumn {
            column: label.to_string(),
        });
    }
    let year_name = year.to_string();
    let names = require_column(wide, COUNTRY_NAME)?.cast(&DataType::String)?;
    let values = wide
        .column(&year_name)
        .map_err(|_| TransformError::MissingYearColumn { year: year_name })?;
    let values = column_f64_values(values)?;
    Ok(DataFrame::new(vec![
        names,
        Series::new(label.into(), values).into_column(),
    ])?)
}

/// Outer-joins single-year tables on `Country Name`.
///
/// Countries appear in order of first appearance across `tables`; a country
/// missing from a table gets a null in that table's columns. The first joined
/// row is then dropped, so four five-row tables over the same countries give
/// four rows.
pub fn merging(tables: &[DataFrame]) -> Result<DataFrame> {
    if tables.is_empty() {
        return Err(TransformError::NoTables);
    }

    let mut order: Vec<String> = Vec::new();
    let mut positions: BTreeMap<String, usize> = BTreeMap::new();
    let mut seen_columns: BTreeSet<String> = BTreeSet::new();
    // (column name, values keyed by country)
    let mut value_columns: Vec<(String, BTreeMap<String, Option<f64>>)> = Vec::new();

    for table in tables {
        let names = country_names(table)?;
        for name in &names {
            if !positions.contains_key(name) {
                positions.insert(name.clone(), order.len());
                order.push(name.clone());
            }
        }
        for column in table.get_columns() {
            let column_name = column.name().to_string();
            if column_name == COUNTRY_NAME {
                continue;
            }
            if !seen_columns.insert(column_name.clone()) {
                return Err(TransformError::DuplicateColumn {
                    column: column_name,
                });
            }
            let keyed = names
                .iter()
                .cloned()
                .zip(column_f64_values(column)?)
                .collect();
            value_columns.push((column_name, keyed));
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(value_columns.len() + 1);
    columns.push(Series::new(COUNTRY_NAME.into(), order.clone()).into_column());
    for (name, keyed) in &value_columns {
        let values: Vec<Option<f64>> = order
            .iter()
            .map(|country| keyed.get(country).copied().flatten())
            .collect();
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }
    let joined = DataFrame::new(columns)?;

    if joined.height() == 0 {
        return Ok(joined);
    }
    debug!(dropped = %order[0], rows = joined.height() - 1, "merged correlation inputs");
    Ok(joined.slice(1, joined.height() - 1))
}

/// Names of the numeric columns of `df`, in column order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|column| is_numeric_dtype(column.dtype()))
        .map(|column| column.name().to_string())
        .collect()
}

/// Square Pearson correlation matrix over labelled columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()` by `labels.len()`. NaN where undefined.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|values| values.get(col)).copied()
    }
}

/// Pairwise Pearson correlation of every numeric column of `df`.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let labels = numeric_columns(df);
    let data = labels
        .iter()
        .map(|label| -> Result<Vec<Option<f64>>> {
            Ok(column_f64_values(require_column(df, label)?)?)
        })
        .collect::<Result<Vec<_>>>()?;

    let values = data
        .iter()
        .map(|x| data.iter().map(|y| pearson(x, y)).collect())
        .collect();
    Ok(CorrelationMatrix { labels, values })
}

/// Pearson correlation over the positions where both values are present.
///
/// NaN with fewer than two shared observations or when either side has zero
/// variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_year(label: &str, countries: &[&str], values: &[f64]) -> DataFrame {
        DataFrame::new(vec![
            Series::new(COUNTRY_NAME.into(), countries.to_vec()).into_column(),
            Series::new(label.into(), values.to_vec()).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn slice_renames_year_column() {
        let wide = DataFrame::new(vec![
            Series::new(COUNTRY_NAME.into(), vec!["Chad", "Peru"]).into_column(),
            Series::new("2012".into(), vec![Some(1.5), None]).into_column(),
            Series::new("2013".into(), vec![Some(2.5), Some(3.0)]).into_column(),
        ])
        .unwrap();
        let sliced = slicing_and_rename(&wide, 2012, "Cereal Yield").unwrap();
        let names: Vec<String> = sliced
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec![COUNTRY_NAME, "Cereal Yield"]);
        assert_eq!(sliced.column("Cereal Yield").unwrap().f64().unwrap().get(1), None);
    }

    #[test]
    fn slice_rejects_country_label() {
        let wide = single_year("2012", &["Chad"], &[1.0]);
        assert!(matches!(
            slicing_and_rename(&wide, 2012, COUNTRY_NAME),
            Err(TransformError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn merge_drops_first_joined_row() {
        let countries = ["A", "B", "C", "D", "E"];
        let tables: Vec<DataFrame> = ["w", "x", "y", "z"]
            .iter()
            .map(|label| single_year(label, &countries, &[1.0, 2.0, 3.0, 4.0, 5.0]))
            .collect();
        let merged = merging(&tables).unwrap();
        assert_eq!(merged.height(), 4);
        assert_eq!(merged.width(), 5);
        assert_eq!(merged.column(COUNTRY_NAME).unwrap().str().unwrap().get(0), Some("B"));
    }

    #[test]
    fn merge_fills_absent_countries_with_null() {
        let first = single_year("x", &["A", "B", "C"], &[1.0, 2.0, 3.0]);
        let second = single_year("y", &["C", "D"], &[30.0, 40.0]);
        let merged = merging(&[first, second]).unwrap();
        let countries: Vec<Option<&str>> = merged
            .column(COUNTRY_NAME)
            .unwrap()
            .str()
            .unwrap()
            .iter()
            .collect();
        assert_eq!(countries, vec![Some("B"), Some("C"), Some("D")]);
        let y: Vec<Option<f64>> = merged.column("y").unwrap().f64().unwrap().iter().collect();
        assert_eq!(y, vec![None, Some(30.0), Some(40.0)]);
    }

    #[test]
    fn merge_rejects_bad_inputs() {
        assert!(matches!(merging(&[]), Err(TransformError::NoTables)));

        let a = single_year("x", &["A"], &[1.0]);
        let b = single_year("x", &["A"], &[2.0]);
        assert!(matches!(
            merging(&[a, b]),
            Err(TransformError::DuplicateColumn { .. })
        ));

        let repeated = single_year("x", &["A", "A"], &[1.0, 2.0]);
        assert!(matches!(
            merging(&[repeated]),
            Err(TransformError::DuplicateCountry { .. })
        ));
    }

    #[test]
    fn pearson_edge_cases() {
        let x = [Some(1.0), Some(2.0), Some(3.0), None];
        let up = [Some(2.0), Some(4.0), Some(6.0), Some(100.0)];
        let down = [Some(3.0), Some(2.0), Some(1.0), Some(0.0)];
        let flat = [Some(5.0), Some(5.0), Some(5.0), Some(5.0)];

        assert!((pearson(&x, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down) + 1.0).abs() < 1e-12);
        assert!(pearson(&x, &flat).is_nan());
        assert!(pearson(&[Some(1.0)], &[Some(2.0)]).is_nan());
    }

    #[test]
    fn matrix_skips_text_columns() {
        let df = DataFrame::new(vec![
            Series::new(COUNTRY_NAME.into(), vec!["A", "B", "C"]).into_column(),
            Series::new("x".into(), vec![1.0, 2.0, 3.0]).into_column(),
            Series::new("y".into(), vec![3.0, 1.0, 2.0]).into_column(),
        ])
        .unwrap();
        let matrix = correlation_matrix(&df).unwrap();
        assert_eq!(matrix.labels, vec!["x", "y"]);
        assert_eq!(matrix.get(0, 0), Some(1.0));
        let xy = matrix.get(0, 1).unwrap();
        assert!((xy + 0.5).abs() < 1e-12);
        assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
    }
}
