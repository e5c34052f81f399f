//! CSV header parsing and normalization.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Result of CSV header analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Normalized column names (trimmed, unique, unnamed cells filled in).
    pub columns: Vec<String>,
    /// Number of physical lines skipped before the header row.
    pub skip_rows: usize,
}

impl CsvHeaders {
    /// Builds headers from raw header cells.
    ///
    /// Empty cells (the trailing comma of a WDI export) become `column_<n>`,
    /// 1-based by position. Duplicate names are rejected.
    pub fn from_raw<'a, I>(raw: I, skip_rows: usize, path: &Path) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut columns = Vec::new();
        let mut seen = BTreeSet::new();
        for (idx, cell) in raw.into_iter().enumerate() {
            let normalized = normalize_header(cell);
            let name = if normalized.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                normalized
            };
            if !seen.insert(name.clone()) {
                return Err(IngestError::DuplicateColumn {
                    column: name,
                    path: path.to_path_buf(),
                });
            }
            columns.push(name);
        }
        if columns.iter().all(|name| name.starts_with("column_")) {
            return Err(IngestError::NoHeaderDetected {
                path: path.to_path_buf(),
            });
        }
        Ok(Self { columns, skip_rows })
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header names that parse as a 4-digit year, in file order.
    pub fn year_columns(&self) -> Vec<i32> {
        self.columns
            .iter()
            .filter(|name| name.len() == 4)
            .filter_map(|name| name.parse::<i32>().ok())
            .collect()
    }
}

/// Normalizes a header value: strips a byte-order mark and surrounding
/// whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_fill_unnamed_columns() {
        let headers = CsvHeaders::from_raw(
            ["Country Name", "Indicator Name", "2012", ""],
            4,
            Path::new("x.csv"),
        )
        .unwrap();
        assert_eq!(
            headers.columns,
            vec!["Country Name", "Indicator Name", "2012", "column_4"]
        );
        assert_eq!(headers.skip_rows, 4);
        assert_eq!(headers.len(), 4);
    }

    #[test]
    fn test_headers_reject_duplicates() {
        let result = CsvHeaders::from_raw(["2012", " 2012 "], 0, Path::new("x.csv"));
        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { ref column, .. }) if column == "2012"
        ));
    }

    #[test]
    fn test_headers_reject_blank_line() {
        let result = CsvHeaders::from_raw(["", ""], 4, Path::new("x.csv"));
        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }

    #[test]
    fn test_year_columns() {
        let headers = CsvHeaders::from_raw(
            ["Country Name", "1960", "Indicator Code", "2020", "12345"],
            0,
            Path::new("x.csv"),
        )
        .unwrap();
        assert_eq!(headers.year_columns(), vec![1960, 2020]);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  hello  "), "hello");
        assert_eq!(normalize_header("\u{feff}Country Name"), "Country Name");
    }
}
