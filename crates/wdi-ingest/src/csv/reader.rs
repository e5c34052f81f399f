//! CSV file reading with a fixed number of preamble lines.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::{IngestError, Result};

use super::header::CsvHeaders;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the header)
    Ok(())
}

/// Reads the file, dropping the first `skip_rows` physical lines.
///
/// Lines are counted raw, blank ones included, so the WDI preamble
/// (`"Data Source"`, blank, `"Last Updated Date"`, blank) is skipped with
/// `skip_rows = 4`.
fn read_after_preamble(path: &Path, skip_rows: usize) -> Result<String> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let reader = BufReader::new(file);
    let mut body = String::new();
    for line_result in reader.lines().skip(skip_rows) {
        let line = line_result.map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        body.push_str(&line);
        body.push('\n');
    }
    Ok(body)
}

fn csv_reader(body: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes())
}

fn parse_headers(
    reader: &mut csv::Reader<&[u8]>,
    path: &Path,
    skip_rows: usize,
) -> Result<CsvHeaders> {
    let record = reader.headers().map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    CsvHeaders::from_raw(record.iter(), skip_rows, path)
}

/// Reads the header row that follows `skip_rows` preamble lines.
pub fn read_csv_schema(path: &Path, skip_rows: usize) -> Result<CsvHeaders> {
    let body = read_after_preamble(path, skip_rows)?;
    if body.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
            skip_rows,
        });
    }
    let mut reader = csv_reader(&body);
    parse_headers(&mut reader, path, skip_rows)
}

/// Reads a WDI indicator export into a DataFrame of nullable string columns.
///
/// The first `skip_rows` lines are discarded, the next line is the header and
/// every following record is a data row. Cell text is kept as written and
/// empty cells become nulls; short
/// records are padded and long ones truncated to the header width. Typing is
/// left to the reshaping step, which knows which columns are years.
pub fn read_indicator_csv(path: &Path, skip_rows: usize) -> Result<DataFrame> {
    let body = read_after_preamble(path, skip_rows)?;
    if body.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
            skip_rows,
        });
    }
    let mut reader = csv_reader(&body);
    let headers = parse_headers(&mut reader, path, skip_rows)?;

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut short_records = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if record.len() < headers.len() {
            short_records += 1;
        }
        for (idx, column) in values.iter_mut().enumerate() {
            let cell = record.get(idx).unwrap_or("");
            column.push(if cell.is_empty() {
                None
            } else {
                Some(cell.to_string())
            });
        }
    }

    if short_records > 0 {
        tracing::debug!(
            path = %path.display(),
            short_records,
            "padded records shorter than the header"
        );
    }

    let columns: Vec<Column> = headers
        .columns
        .iter()
        .zip(values)
        .map(|(name, column)| Series::new(name.as_str().into(), column).into_column())
        .collect();
    let df = DataFrame::new(columns)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded indicator table"
    );
    Ok(df)
}
