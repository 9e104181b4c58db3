//! Table Transformation Engine.
//!
//! [`TableEngine`] owns at most one [`Table`] and applies catalog
//! [`Operation`]s to it. Every operation returns a human-readable status
//! string; failure paths leave the table unmodified.
//!
//! # State machine
//!
//! `Empty` until a table is loaded, then `Loaded`. A fresh load overwrites the
//! previous table; the engine never goes back to `Empty` on its own.
//!
//! # Example
//!
//! ```
//! use cleangraph::engine::{Operation, TableEngine};
//! use cleangraph::table::Table;
//!
//! let mut engine = TableEngine::with_table(Table::from_text_records(
//!     ["id", "age"],
//!     [["1", "30"], ["1", "30"], ["2", ""]],
//! ));
//! let msg = engine.apply(&Operation::RemoveDuplicates { subset: None });
//! assert_eq!(msg, "Removed 1 duplicate rows");
//! ```

mod columns;
mod convert;
mod inspect;
mod missing;
mod operation;
mod rows;

use std::path::Path;

use tracing::debug;

use crate::table::{load_table, Table, TableError};

pub use convert::TargetType;
pub use missing::MissingStrategy;
pub use operation::{
    Operation, OperationError, CATALOG, DEFAULT_PREVIEW_ROWS, TOOL_CONVERT_COLUMN_TYPE,
    TOOL_DROP_COLUMNS, TOOL_HANDLE_MISSING_VALUES, TOOL_REMOVE_DUPLICATES, TOOL_RENAME_COLUMNS,
    TOOL_TABLE_DESCRIBE, TOOL_TABLE_HEAD, TOOL_TABLE_INFO, TOOL_TABLE_TAIL,
};

/// Status reported by every operation when no table is loaded.
pub const NO_TABLE_LOADED: &str = "No table loaded";

/// Engine lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    Empty,
    Loaded,
}

/// Holds the current table and applies operations to it.
#[derive(Clone, Debug, Default)]
pub struct TableEngine {
    table: Option<Table>,
}

impl TableEngine {
    /// Engine with no table loaded.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: Table) -> Self {
        Self { table: Some(table) }
    }

    /// Replaces the current table (if any) with `table`.
    pub fn load(&mut self, table: Table) {
        self.table = Some(table);
    }

    /// Reads `path` and loads it as the current table.
    pub fn load_path(&mut self, path: &Path) -> Result<(), TableError> {
        let table = load_table(path)?;
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "table loaded"
        );
        self.load(table);
        Ok(())
    }

    pub fn status(&self) -> EngineStatus {
        if self.table.is_some() {
            EngineStatus::Loaded
        } else {
            EngineStatus::Empty
        }
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn into_table(self) -> Option<Table> {
        self.table
    }

    /// Applies one operation and returns its status message.
    pub fn apply(&mut self, op: &Operation) -> String {
        let Some(table) = self.table.as_mut() else {
            debug!(operation = op.name(), "no table loaded");
            return NO_TABLE_LOADED.to_string();
        };
        let result = match op {
            Operation::Head { n } => inspect::head(table, *n),
            Operation::Tail { n } => inspect::tail(table, *n),
            Operation::Info => inspect::info(table),
            Operation::Describe => inspect::describe(table),
            Operation::RenameColumns { mapping } => columns::rename_columns(table, mapping),
            Operation::DropColumns { columns } => columns::drop_columns(table, columns),
            Operation::RemoveDuplicates { subset } => {
                rows::remove_duplicates(table, subset.as_deref())
            }
            Operation::ConvertColumnType {
                column,
                target_type,
            } => convert::convert_column_type(table, column, target_type),
            Operation::HandleMissingValues { column, strategy } => {
                missing::handle_missing_values(table, column, strategy)
            }
        };
        debug!(
            operation = op.name(),
            rows = table.row_count(),
            columns = table.column_count(),
            "operation applied"
        );
        result
    }
}
