//! io — CSV ingestion and persistence for signal pipelines.
//!
//! This module handles the file boundary of the pipeline:
//! - [`load_column`] extracts one numeric column from a CSV file, with a
//!   leading row offset and an optional row cap, mirroring the usual
//!   "skip preamble, header, then data" layout of instrument exports.
//! - [`write_filtered`] persists a signal as a one-column CSV with a
//!   `filtered` header.
//!
//! Structural failures (missing column, unparsable cell, empty
//! selection) surface as [`IngestError`]; value-level validation
//! (finiteness, emptiness) is the pipeline's job, not the reader's.

use std::path::Path;

pub type IngestResult<T> = Result<T, IngestError>;

/// IngestError — failures at the CSV boundary.
#[derive(Debug)]
pub enum IngestError {
    /// Underlying I/O or CSV-format failure.
    Csv(String),
    /// A data row does not contain the requested column.
    ColumnOutOfRange { row: usize, column: usize, width: usize },
    /// A cell could not be parsed as a real number.
    Parse { row: usize, column: usize, value: String },
    /// The selection produced no data rows.
    NoRows,
}

impl std::error::Error for IngestError {}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Csv(msg) => write!(f, "Ingest Error: {msg}"),
            IngestError::ColumnOutOfRange { row, column, width } => write!(
                f,
                "Ingest Error: Row {row} has {width} columns, column {column} requested."
            ),
            IngestError::Parse { row, column, value } => write!(
                f,
                "Ingest Error: Cell at row {row}, column {column} is not numeric: {value:?}."
            ),
            IngestError::NoRows => {
                write!(f, "Ingest Error: Selection produced no data rows.")
            }
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Csv(err.to_string())
    }
}

/// Load one numeric column from a CSV file.
///
/// # Arguments
/// - `path`: CSV file to read.
/// - `column`: zero-based column index holding the samples.
/// - `start_row`: number of leading records to skip before the header
///   row; the record immediately after the skipped block is treated as
///   the header and discarded.
/// - `end_row`: optional cap on the number of data rows to keep.
///
/// # Returns
/// The selected samples in file order.
///
/// # Errors
/// - `IngestError::Csv` for I/O and format failures.
/// - `IngestError::ColumnOutOfRange` / `IngestError::Parse` for
///   malformed data rows.
/// - `IngestError::NoRows` when the selection is empty.
pub fn load_column(
    path: &Path,
    column: usize,
    start_row: usize,
    end_row: Option<usize>,
) -> IngestResult<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut samples = Vec::new();
    // Skip the preamble block plus the header record itself.
    for (index, record) in reader.records().enumerate().skip(start_row + 1) {
        if let Some(cap) = end_row {
            if samples.len() >= cap {
                break;
            }
        }
        let record = record?;
        let cell = record.get(column).ok_or(IngestError::ColumnOutOfRange {
            row: index,
            column,
            width: record.len(),
        })?;
        let value = cell.trim().parse::<f64>().map_err(|_| IngestError::Parse {
            row: index,
            column,
            value: cell.to_string(),
        })?;
        samples.push(value);
    }

    if samples.is_empty() {
        return Err(IngestError::NoRows);
    }
    Ok(samples)
}

/// Write a signal as a one-column CSV with a `filtered` header.
pub fn write_filtered(path: &Path, signal: &[f64]) -> IngestResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["filtered"])?;
    for value in signal {
        writer.write_record([value.to_string()])?;
    }
    writer.flush().map_err(|err| IngestError::Csv(err.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn temp_csv(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "hybrid_denoise_io_test_{}_{}.csv",
            std::process::id(),
            contents.len()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_selected_column_after_header() {
        let path = temp_csv("time,field\n0,10.5\n1,11.5\n2,12.5\n");

        let samples = load_column(&path, 1, 0, None).unwrap();

        assert_eq!(samples, vec![10.5, 11.5, 12.5]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn honors_start_and_end_rows() {
        let path = temp_csv("preamble line,x\ntime,field\n0,1.0\n1,2.0\n2,3.0\n3,4.0\n");

        // Skip the preamble record, then the header, then keep two rows.
        let samples = load_column(&path, 1, 1, Some(2)).unwrap();

        assert_eq!(samples, vec![1.0, 2.0]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn non_numeric_cell_is_a_parse_error() {
        let path = temp_csv("time,field\n0,abc\n");

        let got = load_column(&path, 1, 0, None);

        assert!(matches!(got, Err(IngestError::Parse { .. })));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_selection_is_rejected() {
        let path = temp_csv("time,field\n");

        assert!(matches!(load_column(&path, 1, 0, None), Err(IngestError::NoRows)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn written_signal_round_trips() {
        let mut path = std::env::temp_dir();
        path.push(format!("hybrid_denoise_io_roundtrip_{}.csv", std::process::id()));

        write_filtered(&path, &[1.25, -3.5, 0.0]).unwrap();
        let samples = load_column(&path, 0, 0, None).unwrap();

        assert_eq!(samples, vec![1.25, -3.5, 0.0]);
        std::fs::remove_file(path).ok();
    }
}
