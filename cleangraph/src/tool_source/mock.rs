//! Mock ToolSource for loop tests.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::engine::TableEngine;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// Fixed tool list and fixed call result; never touches the engine.
pub struct MockToolSource {
    tools: Vec<ToolSpec>,
    call_result: String,
}

impl MockToolSource {
    pub fn new(tools: Vec<ToolSpec>, call_result: impl Into<String>) -> Self {
        Self {
            tools,
            call_result: call_result.into(),
        }
    }

    /// One argument-less tool `table_info` answering `call_result`.
    pub fn table_info_example(call_result: impl Into<String>) -> Self {
        Self::new(
            vec![ToolSpec {
                name: "table_info".to_string(),
                description: Some("Show table info.".to_string()),
                input_schema: json!({ "type": "object", "properties": {} }),
            }],
            call_result,
        )
    }
}

#[async_trait]
impl ToolSource for MockToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(
        &self,
        name: &str,
        _arguments: Value,
        _engine: &mut TableEngine,
    ) -> Result<ToolCallContent, ToolSourceError> {
        if !self.tools.iter().any(|t| t.name == name) {
            return Err(ToolSourceError::NotFound(name.to_string()));
        }
        Ok(ToolCallContent {
            text: self.call_result.clone(),
        })
    }
}
