//! The cleaning catalog as a [`ToolSource`].

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::engine::{
    Operation, OperationError, TableEngine, CATALOG, TOOL_CONVERT_COLUMN_TYPE, TOOL_DROP_COLUMNS,
    TOOL_HANDLE_MISSING_VALUES, TOOL_REMOVE_DUPLICATES, TOOL_RENAME_COLUMNS, TOOL_TABLE_DESCRIBE,
    TOOL_TABLE_HEAD, TOOL_TABLE_INFO, TOOL_TABLE_TAIL,
};

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

fn spec(name: &str, description: &str, input_schema: Value) -> ToolSpec {
    ToolSpec {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema,
    }
}

fn no_arguments() -> Value {
    json!({ "type": "object", "properties": {} })
}

fn preview_schema(which: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "n": {
                "type": "integer",
                "minimum": 0,
                "description": format!("Number of {} rows to return (default 5)", which)
            }
        }
    })
}

/// Specs for the whole catalog, in catalog order.
fn catalog_specs() -> Vec<ToolSpec> {
    let specs = vec![
        spec(
            TOOL_TABLE_HEAD,
            "Return the first n rows of the current table as JSON records.",
            preview_schema("first"),
        ),
        spec(
            TOOL_TABLE_TAIL,
            "Return the last n rows of the current table as JSON records.",
            preview_schema("last"),
        ),
        spec(
            TOOL_TABLE_INFO,
            "Return column types, column names, shape and missing-value counts per column.",
            no_arguments(),
        ),
        spec(
            TOOL_TABLE_DESCRIBE,
            "Return summary statistics (count, mean, std, min, quartiles, max) for numeric columns.",
            no_arguments(),
        ),
        spec(
            TOOL_RENAME_COLUMNS,
            "Rename columns. Names not in the table are ignored; a mapping that would create duplicate names is rejected.",
            json!({
                "type": "object",
                "properties": {
                    "column_mapping": {
                        "type": "object",
                        "description": "Map of old column name to new column name",
                        "additionalProperties": { "type": "string" }
                    }
                },
                "required": ["column_mapping"]
            }),
        ),
        spec(
            TOOL_DROP_COLUMNS,
            "Drop the listed columns. Names not in the table are ignored.",
            json!({
                "type": "object",
                "properties": {
                    "columns": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Column names to drop"
                    }
                },
                "required": ["columns"]
            }),
        ),
        spec(
            TOOL_REMOVE_DUPLICATES,
            "Remove rows that duplicate an earlier row, keeping the first occurrence.",
            json!({
                "type": "object",
                "properties": {
                    "subset": {
                        "type": ["array", "null"],
                        "items": { "type": "string" },
                        "description": "Columns compared when identifying duplicates; all columns when omitted"
                    }
                }
            }),
        ),
        spec(
            TOOL_CONVERT_COLUMN_TYPE,
            "Convert a column to another type. Values that cannot be converted become missing.",
            json!({
                "type": "object",
                "properties": {
                    "column": { "type": "string", "description": "Column to convert" },
                    "target_type": {
                        "type": "string",
                        "enum": ["numeric", "datetime", "categorical", "category"],
                        "description": "Target type"
                    }
                },
                "required": ["column", "target_type"]
            }),
        ),
        spec(
            TOOL_HANDLE_MISSING_VALUES,
            "Resolve missing values in one column: drop the rows, fill with mean/median (numeric only) or mode, or fill forward/backward.",
            json!({
                "type": "object",
                "properties": {
                    "column": { "type": "string", "description": "Column to process" },
                    "strategy": {
                        "type": "string",
                        "enum": ["drop", "mean", "median", "mode", "ffill", "bfill"],
                        "description": "How to resolve missing values"
                    }
                },
                "required": ["column", "strategy"]
            }),
        ),
    ];
    debug_assert_eq!(specs.len(), CATALOG.len());
    specs
}

/// Cleaning catalog: parses each call into an [`Operation`] and applies it to
/// the engine passed in by the Act node.
#[derive(Clone, Debug)]
pub struct TableToolSource {
    specs: Vec<ToolSpec>,
}

impl Default for TableToolSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TableToolSource {
    pub fn new() -> Self {
        Self {
            specs: catalog_specs(),
        }
    }

    /// Catalog specs without going through the async trait.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.specs.clone()
    }
}

#[async_trait]
impl ToolSource for TableToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.specs())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
        engine: &mut TableEngine,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let op = Operation::from_call(name, arguments).map_err(|e| match e {
            OperationError::Unknown(name) => ToolSourceError::NotFound(name),
            e @ OperationError::InvalidArguments { .. } => {
                ToolSourceError::InvalidInput(e.to_string())
            }
        })?;
        debug!(tool = name, inspection = op.is_inspection(), "applying operation");
        Ok(ToolCallContent {
            text: engine.apply(&op),
        })
    }
}
