//! CSV reading utilities.

mod header;
mod reader;
mod writer;

pub use header::{CsvHeaders, normalize_header};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_schema,
    read_indicator_csv, validate_encoding,
};
pub use writer::write_csv_table;
