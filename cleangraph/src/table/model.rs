//! In-memory table: ordered unique columns with type tags, and rows of cells.
//!
//! Rows are stored positionally, aligned with `columns`, so every row always holds
//! exactly one cell per current column. Mutation helpers are crate-private; the
//! engine is the only writer.

use std::collections::HashSet;

use super::error::TableError;
use super::value::{Cell, ColumnType, Value};

/// Column metadata: name and declared type tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// The single mutable tabular dataset the engine operates on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub(crate) columns: Vec<Column>,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table from explicit columns and rows.
    ///
    /// Fails when column names are not unique or a row's width differs from the
    /// column count.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Cell>>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for c in &columns {
            if !seen.insert(c.name.as_str()) {
                return Err(TableError::DuplicateColumn(c.name.clone()));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RowWidth {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Builds a table from header names and raw text records, the way a delimited
    /// file is read: missing markers become absent, and columns whose non-missing
    /// cells all parse as finite numbers are tagged numeric.
    ///
    /// Header names are made unique; records are padded or truncated to the header width.
    pub fn from_text_records<H, R, S>(headers: H, records: R) -> Self
    where
        H: IntoIterator<Item = S>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers = unique_headers(headers.into_iter().map(|h| h.as_ref().to_string()));
        let width = headers.len();
        let rows: Vec<Vec<Cell>> = records
            .into_iter()
            .map(|record| {
                let mut row: Vec<Cell> = record
                    .into_iter()
                    .take(width)
                    .map(|raw| parse_text_cell(raw.as_ref()))
                    .collect();
                row.resize(width, None);
                row
            })
            .collect();
        Self::from_cells(headers, rows)
    }

    /// Builds a table from already-typed cells, inferring each column's tag:
    /// all numbers → numeric, all datetimes → datetime, otherwise text (non-text
    /// values are rendered to text so the column is homogeneous).
    pub(crate) fn from_cells(headers: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let mut columns = Vec::with_capacity(headers.len());
        for (idx, name) in headers.into_iter().enumerate() {
            let kind = infer_kind(rows.iter().map(|r| &r[idx]));
            if kind == ColumnType::Text {
                for row in rows.iter_mut() {
                    let rendered = match &row[idx] {
                        Some(v) if !matches!(v, Value::Text(_)) => Some(v.to_string()),
                        _ => None,
                    };
                    if let Some(text) = rendered {
                        row[idx] = Some(Value::Text(text));
                    }
                }
            }
            columns.push(Column { name, kind });
        }
        let mut table = Self { columns, rows };
        table.normalize_numeric_columns();
        table
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cells of the column at `idx`, top to bottom.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |r| &r[idx])
    }

    /// Cell at (`row`, column `name`), or `None` if either is out of range.
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Number of absent cells in the column at `idx`.
    pub fn missing_count(&self, idx: usize) -> usize {
        self.column_cells(idx).filter(|c| c.is_none()).count()
    }
}

/// Missing-value markers recognised when reading text cells.
pub const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Parses one raw text cell: missing markers become absent, everything else is text.
/// Numeric typing happens per column in [`Table::from_cells`].
pub(crate) fn parse_text_cell(raw: &str) -> Cell {
    if MISSING_MARKERS.contains(&raw.trim()) {
        None
    } else {
        Some(Value::Text(raw.to_string()))
    }
}

/// Parses a trimmed string as a finite number.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a Cell>) -> ColumnType {
    let mut all_numeric = true;
    let mut all_datetime = true;
    let mut any = false;
    for cell in cells {
        let Some(v) = cell else { continue };
        any = true;
        match v {
            Value::Number(_) => all_datetime = false,
            Value::DateTime(_) => all_numeric = false,
            Value::Text(s) => {
                all_datetime = false;
                if parse_number(s).is_none() {
                    all_numeric = false;
                }
            }
        }
        if !all_numeric && !all_datetime {
            return ColumnType::Text;
        }
    }
    if !any {
        // An all-missing column reads as numeric (NaN-filled), like a float column.
        return ColumnType::Numeric;
    }
    if all_numeric {
        ColumnType::Numeric
    } else {
        ColumnType::Datetime
    }
}

/// Makes header names unique: repeats get `.1`, `.2` suffixes, empty names
/// become `Unnamed: <index>`.
pub(crate) fn unique_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for (i, h) in headers.enumerate() {
        let base = if h.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            h
        };
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, n);
            n += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

impl Table {
    /// Converts numeric-tagged text cells into numbers. Called after inference so
    /// that numeric columns hold `Value::Number` only.
    fn normalize_numeric_columns(&mut self) {
        for (idx, col) in self.columns.iter().enumerate() {
            if col.kind != ColumnType::Numeric {
                continue;
            }
            for row in self.rows.iter_mut() {
                let parsed = match &row[idx] {
                    Some(Value::Text(s)) => Some(parse_number(s).map(Value::Number)),
                    _ => None,
                };
                if let Some(cell) = parsed {
                    row[idx] = cell;
                }
            }
        }
    }
}
