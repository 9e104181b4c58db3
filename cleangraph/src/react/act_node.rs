//! Act node: apply the pending tool calls to the run's table engine.
//!
//! Every call that is executed counts as one operation, including calls whose
//! result is an error message. Calls beyond the operation cap are skipped.
//!
//! # Error Handling
//!
//! - `HandleToolErrors::Never` - a tool error aborts the run (default)
//! - `HandleToolErrors::Always` - the error becomes the call's result text
//! - `HandleToolErrors::Custom(handler)` - the handler renders the result text

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::{CleanState, ToolCall, ToolResult};
use crate::tool_source::{ToolSource, ToolSourceError};

/// Truncates a string for logging, appending "..." if longer than `max_len` chars.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

/// Error text used by `HandleToolErrors::Always(None)`.
pub const DEFAULT_EXECUTION_ERROR_TEMPLATE: &str =
    "Error executing tool '{tool_name}' with kwargs {tool_kwargs} with error:\n {error}\n Please fix the error and try again.";

/// Renders a tool error (error, tool name, arguments) into result text.
pub type ErrorHandlerFn =
    Arc<dyn Fn(&ToolSourceError, &str, &Value) -> String + Send + Sync + 'static>;

/// How ActNode handles tool errors.
#[derive(Clone, Default)]
pub enum HandleToolErrors {
    #[default]
    Never,
    /// Catch errors; `None` uses [`DEFAULT_EXECUTION_ERROR_TEMPLATE`].
    Always(Option<String>),
    Custom(ErrorHandlerFn),
}

impl std::fmt::Debug for HandleToolErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => write!(f, "HandleToolErrors::Never"),
            Self::Always(msg) => write!(f, "HandleToolErrors::Always({:?})", msg),
            Self::Custom(_) => write!(f, "HandleToolErrors::Custom(<fn>)"),
        }
    }
}

fn parse_arguments(raw: &str) -> Result<Value, ToolSourceError> {
    if raw.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(raw)
        .map_err(|e| ToolSourceError::InvalidInput(format!("arguments are not valid JSON: {}", e)))
}

/// Applies `state.tool_calls` through a [`ToolSource`] and writes `state.tool_results`.
pub struct ActNode {
    tools: Box<dyn ToolSource>,
    handle_tool_errors: HandleToolErrors,
}

impl ActNode {
    /// Tool errors propagate by default (`HandleToolErrors::Never`).
    pub fn new(tools: Box<dyn ToolSource>) -> Self {
        Self {
            tools,
            handle_tool_errors: HandleToolErrors::Never,
        }
    }

    pub fn with_handle_tool_errors(mut self, handle_tool_errors: HandleToolErrors) -> Self {
        self.handle_tool_errors = handle_tool_errors;
        self
    }

    /// `Some(text)` when the error is caught, `None` when it should propagate.
    fn handle_error(
        &self,
        error: &ToolSourceError,
        tool_name: &str,
        tool_args: &Value,
    ) -> Option<String> {
        match &self.handle_tool_errors {
            HandleToolErrors::Never => None,
            HandleToolErrors::Always(custom_msg) => Some(custom_msg.clone().unwrap_or_else(|| {
                DEFAULT_EXECUTION_ERROR_TEMPLATE
                    .replace("{tool_name}", tool_name)
                    .replace("{tool_kwargs}", &tool_args.to_string())
                    .replace("{error}", &error.to_string())
            })),
            HandleToolErrors::Custom(handler) => Some(handler(error, tool_name, tool_args)),
        }
    }

    async fn call_one(
        &self,
        tc: &ToolCall,
        state: &mut CleanState,
    ) -> Result<String, AgentError> {
        let parsed = parse_arguments(&tc.arguments);
        debug!(tool = %tc.name, args = %tc.arguments, "Calling tool");
        let (args, result) = match parsed {
            Ok(args) => {
                let result = self
                    .tools
                    .call_tool(&tc.name, args.clone(), &mut state.engine)
                    .await;
                (args, result)
            }
            Err(e) => (Value::String(tc.arguments.clone()), Err(e)),
        };
        match result {
            Ok(content) => {
                trace!(
                    tool = %tc.name,
                    result_len = content.text.len(),
                    result_preview = %truncate_for_log(&content.text, 200),
                    "Tool returned"
                );
                Ok(content.text)
            }
            Err(e) => {
                warn!(tool = %tc.name, error = %e, "Tool call failed");
                self.handle_error(&e, &tc.name, &args)
                    .ok_or_else(|| AgentError::ExecutionFailed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl Node<CleanState> for ActNode {
    fn id(&self) -> &str {
        "act"
    }

    async fn run(&self, mut state: CleanState) -> Result<(CleanState, Next), AgentError> {
        let calls = std::mem::take(&mut state.tool_calls);
        let mut tool_results = Vec::with_capacity(calls.len());

        for (i, tc) in calls.iter().enumerate() {
            if state.is_exhausted() {
                warn!(
                    skipped = calls.len() - i,
                    max_operations = state.max_operations,
                    "Operation cap reached; skipping remaining tool calls"
                );
                break;
            }
            let content = self.call_one(tc, &mut state).await?;
            state.operations_applied += 1;
            tool_results.push(ToolResult {
                call_id: tc.id.clone(),
                name: Some(tc.name.clone()),
                content,
            });
        }

        state.tool_calls = calls;
        state.tool_results = tool_results;
        Ok((state, Next::Continue))
    }
}
