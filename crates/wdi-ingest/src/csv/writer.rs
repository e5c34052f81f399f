//! CSV export of reshaped tables.

use std::path::Path;

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_string;

/// Writes `df` to `path` with a header row. Nulls become empty cells.
pub fn write_csv_table(df: &DataFrame, path: &Path) -> Result<()> {
    let write_error = |message: String| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message,
    };
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(e.to_string()))?;

    let header: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    writer
        .write_record(&header)
        .map_err(|e| write_error(e.to_string()))?;

    let columns = df.get_columns();
    for row in 0..df.height() {
        let mut record = Vec::with_capacity(columns.len());
        for column in columns {
            record.push(any_to_string(column.get(row)?));
        }
        writer
            .write_record(&record)
            .map_err(|e| write_error(e.to_string()))?;
    }
    writer.flush().map_err(|e| write_error(e.to_string()))?;
    Ok(())
}
