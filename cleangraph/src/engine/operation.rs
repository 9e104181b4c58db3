//! Operation catalog: tool names and typed argument bundles.
//!
//! An [`Operation`] is parsed from one decision (tool name + JSON arguments) and
//! consumed once by [`TableEngine::apply`](super::TableEngine::apply).
//! Argument values whose meaning is checked by the engine (target type, strategy)
//! stay strings here so that an unknown tag is reported as result text, not as a
//! parse failure.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Tool name for inspect-head.
pub const TOOL_TABLE_HEAD: &str = "table_head";
/// Tool name for inspect-tail.
pub const TOOL_TABLE_TAIL: &str = "table_tail";
/// Tool name for inspect-info.
pub const TOOL_TABLE_INFO: &str = "table_info";
/// Tool name for inspect-describe.
pub const TOOL_TABLE_DESCRIBE: &str = "table_describe";
/// Tool name for rename-columns.
pub const TOOL_RENAME_COLUMNS: &str = "rename_columns";
/// Tool name for drop-columns.
pub const TOOL_DROP_COLUMNS: &str = "drop_columns";
/// Tool name for remove-duplicates.
pub const TOOL_REMOVE_DUPLICATES: &str = "remove_duplicates";
/// Tool name for convert-column-type.
pub const TOOL_CONVERT_COLUMN_TYPE: &str = "convert_column_type";
/// Tool name for handle-missing-values.
pub const TOOL_HANDLE_MISSING_VALUES: &str = "handle_missing_values";

/// Every tool name in the catalog, in listing order.
pub const CATALOG: &[&str] = &[
    TOOL_TABLE_HEAD,
    TOOL_TABLE_TAIL,
    TOOL_TABLE_INFO,
    TOOL_TABLE_DESCRIBE,
    TOOL_RENAME_COLUMNS,
    TOOL_DROP_COLUMNS,
    TOOL_REMOVE_DUPLICATES,
    TOOL_CONVERT_COLUMN_TYPE,
    TOOL_HANDLE_MISSING_VALUES,
];

/// Default row count for `table_head` / `table_tail`.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// One invocation of a catalog operation with its arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Head { n: usize },
    Tail { n: usize },
    Info,
    Describe,
    /// Old name → new name, in the order given.
    RenameColumns { mapping: Vec<(String, String)> },
    DropColumns { columns: Vec<String> },
    /// `None` or an empty subset means all columns.
    RemoveDuplicates { subset: Option<Vec<String>> },
    ConvertColumnType { column: String, target_type: String },
    HandleMissingValues { column: String, strategy: String },
}

/// Decision that could not be turned into an [`Operation`].
#[derive(Debug, Error, PartialEq)]
pub enum OperationError {
    #[error("unknown operation: {0}")]
    Unknown(String),
    #[error("invalid arguments for {name}: {reason}")]
    InvalidArguments { name: String, reason: String },
}

#[derive(Deserialize)]
struct PreviewArgs {
    #[serde(default = "default_preview_rows")]
    n: usize,
}

fn default_preview_rows() -> usize {
    DEFAULT_PREVIEW_ROWS
}

#[derive(Deserialize)]
struct RenameArgs {
    column_mapping: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct DropArgs {
    columns: Vec<String>,
}

#[derive(Deserialize)]
struct DuplicatesArgs {
    #[serde(default)]
    subset: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct ConvertArgs {
    column: String,
    target_type: String,
}

#[derive(Deserialize)]
struct MissingArgs {
    column: String,
    strategy: String,
}

impl Operation {
    /// Parses a decision (tool name + JSON arguments) into an operation.
    ///
    /// `null` arguments are treated as an empty object so tools without required
    /// arguments can be called bare.
    pub fn from_call(name: &str, arguments: Value) -> Result<Self, OperationError> {
        let arguments = if arguments.is_null() {
            Value::Object(Default::default())
        } else {
            arguments
        };
        let invalid = |e: serde_json::Error| OperationError::InvalidArguments {
            name: name.to_string(),
            reason: e.to_string(),
        };
        match name {
            TOOL_TABLE_HEAD => {
                let a: PreviewArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(Self::Head { n: a.n })
            }
            TOOL_TABLE_TAIL => {
                let a: PreviewArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(Self::Tail { n: a.n })
            }
            TOOL_TABLE_INFO => Ok(Self::Info),
            TOOL_TABLE_DESCRIBE => Ok(Self::Describe),
            TOOL_RENAME_COLUMNS => {
                let a: RenameArgs = serde_json::from_value(arguments).map_err(invalid)?;
                let mut mapping = Vec::with_capacity(a.column_mapping.len());
                for (old, new) in a.column_mapping {
                    match new {
                        Value::String(new) => mapping.push((old, new)),
                        other => {
                            return Err(OperationError::InvalidArguments {
                                name: name.to_string(),
                                reason: format!(
                                    "new name for column '{}' must be a string, got {}",
                                    old, other
                                ),
                            })
                        }
                    }
                }
                Ok(Self::RenameColumns { mapping })
            }
            TOOL_DROP_COLUMNS => {
                let a: DropArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(Self::DropColumns { columns: a.columns })
            }
            TOOL_REMOVE_DUPLICATES => {
                let a: DuplicatesArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(Self::RemoveDuplicates { subset: a.subset })
            }
            TOOL_CONVERT_COLUMN_TYPE => {
                let a: ConvertArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(Self::ConvertColumnType {
                    column: a.column,
                    target_type: a.target_type,
                })
            }
            TOOL_HANDLE_MISSING_VALUES => {
                let a: MissingArgs = serde_json::from_value(arguments).map_err(invalid)?;
                Ok(Self::HandleMissingValues {
                    column: a.column,
                    strategy: a.strategy,
                })
            }
            other => Err(OperationError::Unknown(other.to_string())),
        }
    }

    /// Catalog tool name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Head { .. } => TOOL_TABLE_HEAD,
            Self::Tail { .. } => TOOL_TABLE_TAIL,
            Self::Info => TOOL_TABLE_INFO,
            Self::Describe => TOOL_TABLE_DESCRIBE,
            Self::RenameColumns { .. } => TOOL_RENAME_COLUMNS,
            Self::DropColumns { .. } => TOOL_DROP_COLUMNS,
            Self::RemoveDuplicates { .. } => TOOL_REMOVE_DUPLICATES,
            Self::ConvertColumnType { .. } => TOOL_CONVERT_COLUMN_TYPE,
            Self::HandleMissingValues { .. } => TOOL_HANDLE_MISSING_VALUES,
        }
    }

    /// True for operations that only read the table.
    pub fn is_inspection(&self) -> bool {
        matches!(
            self,
            Self::Head { .. } | Self::Tail { .. } | Self::Info | Self::Describe
        )
    }
}
