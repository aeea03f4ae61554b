//! Shared CSV plumbing for the three reference tables.

use crate::error::{ProcessingError, Result};
use std::io::Read;

/// Build a header-driven, whitespace-trimming CSV reader
pub fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Fail with `DataFormat` (row 0) if any required column is absent
pub fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    source_name: &str,
    required: &[&str],
) -> Result<()> {
    let headers = reader.headers()?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(ProcessingError::data_format(
                source_name,
                0,
                format!("missing column '{}'", column),
            ));
        }
    }
    Ok(())
}

/// Attribute a row-level CSV failure to its source and 1-based data row
pub fn row_error(source_name: &str, row: usize, error: csv::Error) -> ProcessingError {
    if error.is_io_error() {
        ProcessingError::Csv(error)
    } else {
        ProcessingError::data_format(source_name, row, error.to_string())
    }
}
