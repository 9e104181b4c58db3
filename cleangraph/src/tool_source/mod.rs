//! Tool catalog exposed to the decision-maker.
//!
//! A [`ToolSource`] lists JSON-schema-described tools and executes one call
//! (name + JSON arguments) against the table engine owned by the current run.
//! [`TableToolSource`] is the cleaning catalog; [`MockToolSource`] returns fixed
//! text for loop tests.

mod mock;
mod table_tool_source;

pub use mock::MockToolSource;
pub use table_tool_source::TableToolSource;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::engine::TableEngine;

/// Tool description sent to the decision-maker.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    /// JSON Schema object describing the arguments.
    pub input_schema: Value,
}

/// Text result of one tool call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCallContent {
    pub text: String,
}

/// Call that could not be executed at all (as opposed to an operation that ran
/// and reported a problem in its result text).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Lists tools and executes calls against the run's engine.
#[async_trait]
pub trait ToolSource: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
        engine: &mut TableEngine,
    ) -> Result<ToolCallContent, ToolSourceError>;
}
