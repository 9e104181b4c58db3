//! Load tables from CSV/TSV/spreadsheet files and write cleaned tables back out.
//!
//! Spreadsheets are read from the first worksheet with the first row as header.
//! There is no spreadsheet writer, so spreadsheet sources are saved as CSV.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use super::error::TableError;
use super::model::{parse_text_cell, unique_headers, Table};
use super::value::{format_number, parse_datetime, Cell, Value};

/// Container format of a tabular file, detected from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Tsv,
    Spreadsheet,
}

impl FileFormat {
    /// Detects the format from the (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "xls" | "xlsx" | "xlsm" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(TableError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                ext
            })),
        }
    }

    /// Format a cleaned table is written in: delimited sources keep their format,
    /// spreadsheets become CSV.
    pub fn output(self) -> Self {
        match self {
            Self::Spreadsheet => Self::Csv,
            other => other,
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// True when the path has a tabular extension the loader accepts.
pub fn is_tabular(path: &Path) -> bool {
    FileFormat::from_path(path).is_ok()
}

/// Loads a whole tabular file into memory.
pub fn load_table(path: &Path) -> Result<Table, TableError> {
    let format = FileFormat::from_path(path)?;
    let table = match format {
        FileFormat::Csv | FileFormat::Tsv => load_delimited(path, format.delimiter())?,
        FileFormat::Spreadsheet => load_spreadsheet(path)?,
    };
    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Loaded table"
    );
    Ok(table)
}

fn load_delimited(path: &Path, delimiter: u8) -> Result<Table, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }
    Ok(Table::from_text_records(headers, records))
}

fn load_spreadsheet(path: &Path) -> Result<Table, TableError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(TableError::NoWorksheet)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .map(|row| row.iter().map(header_cell_to_string).collect())
        .unwrap_or_default();
    let headers = unique_headers(headers.into_iter());
    let width = headers.len();

    let rows: Vec<Vec<Cell>> = rows_iter
        .map(|row| {
            let mut cells: Vec<Cell> = row.iter().take(width).map(spreadsheet_cell).collect();
            cells.resize(width, None);
            cells
        })
        .collect();
    Ok(Table::from_cells(headers, rows))
}

fn header_cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        other => other.to_string(),
    }
}

/// Converts a spreadsheet cell to a typed cell. Error cells (`#N/A`, `#DIV/0!`) read as absent.
fn spreadsheet_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::Int(i) => Some(Value::Number(*i as f64)),
        Data::Float(f) if f.is_finite() => Some(Value::Number(*f)),
        Data::Float(_) => None,
        Data::Bool(b) => Some(Value::Text(b.to_string())),
        Data::String(s) => parse_text_cell(s),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Some(Value::DateTime(ndt)),
            None => Some(Value::Number(dt.as_f64())),
        },
        Data::DateTimeIso(s) => match parse_datetime(s) {
            Some(ndt) => Some(Value::DateTime(ndt)),
            None => Some(Value::Text(s.clone())),
        },
        Data::DurationIso(s) => Some(Value::Text(s.clone())),
    }
}

/// Destination for the cleaned version of `source`: `<output_dir>/cleaned_<file name>`.
/// Spreadsheet sources get a `.csv` extension since they are written as CSV.
pub fn cleaned_path(source: &Path, output_dir: &Path) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "table.csv".to_string());
    let name = match FileFormat::from_path(source) {
        Ok(FileFormat::Spreadsheet) => {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "table".to_string());
            format!("cleaned_{}.csv", stem)
        }
        _ => format!("cleaned_{}", file_name),
    };
    output_dir.join(name)
}

/// Writes `table` to `path` in `format` (spreadsheets fall back to CSV).
///
/// Absent cells become empty fields.
pub fn save_table(table: &Table, path: &Path, format: FileFormat) -> Result<(), TableError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.output().delimiter())
        .from_path(path)?;
    writer.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| match cell {
            Some(v) => v.to_string(),
            None => String::new(),
        }))?;
    }
    writer.flush().map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = table.row_count(), "Saved table");
    Ok(())
}
