//! Inspection helpers over the raw indicator table.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;
use wdi_model::{COUNTRY_NAME, INDICATOR_NAME};

use crate::error::{IngestError, Result};
use crate::polars_utils::column_string_values;

/// A (country, indicator) pair that occurs more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    pub country: String,
    pub indicator: String,
    pub occurrences: usize,
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name).map_err(|_| IngestError::ColumnNotFound {
        column: name.to_string(),
    })?;
    column_string_values(column)
}

/// Distinct indicator names in first-appearance order.
pub fn list_indicators(raw: &DataFrame) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut indicators = Vec::new();
    for name in string_column(raw, INDICATOR_NAME)?.into_iter().flatten() {
        if seen.insert(name.clone()) {
            indicators.push(name);
        }
    }
    Ok(indicators)
}

/// Finds (country, indicator) pairs that appear on more than one row.
///
/// A WDI export holds exactly one row per pair; anything returned here
/// means the file was edited or concatenated.
pub fn check_unique_pairs(raw: &DataFrame) -> Result<Vec<DuplicatePair>> {
    let countries = string_column(raw, COUNTRY_NAME)?;
    let indicators = string_column(raw, INDICATOR_NAME)?;

    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for (country, indicator) in countries.into_iter().zip(indicators) {
        if let (Some(country), Some(indicator)) = (country, indicator) {
            *counts.entry((country, indicator)).or_insert(0) += 1;
        }
    }

    Ok(counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((country, indicator), occurrences)| DuplicatePair {
            country,
            indicator,
            occurrences,
        })
        .collect())
}
