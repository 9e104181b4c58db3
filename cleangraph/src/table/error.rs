//! Table load/save error types.
//!
//! These are the only pipeline-fatal errors: they abort processing of one file.
//! Operation failures never surface here; the engine reports them as result text.

use std::path::PathBuf;

use thiserror::Error;

/// Error loading, building or saving a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// Filesystem failure (e.g. creating the output directory).
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited file could not be read or written.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet file could not be opened or read.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// File extension is not a supported tabular format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Workbook contains no worksheets.
    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}
