//! Per-file cleaning state that flows through the think → act → observe graph.

use crate::engine::TableEngine;
use crate::message::Message;

/// Default cap on operations applied per file.
pub const DEFAULT_MAX_OPERATIONS: usize = 30;

/// One tool invocation requested by the decision-maker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCall {
    /// Catalog tool name.
    pub name: String,
    /// JSON object text; empty is treated as `{}`.
    pub arguments: String,
    /// Provider call id, when the backend issues one.
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
            id: None,
        }
    }
}

/// Result text of one applied tool call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolResult {
    pub call_id: Option<String>,
    pub name: Option<String>,
    pub content: String,
}

/// State of one file's cleaning run.
///
/// `tool_calls` and `tool_results` hold the current turn only; observe moves the
/// results into `messages` and clears both. The table lives in `engine`, owned
/// by this state for the duration of the run.
#[derive(Clone, Debug)]
pub struct CleanState {
    pub messages: Vec<Message>,
    pub tool_calls: Vec<ToolCall>,
    pub tool_results: Vec<ToolResult>,
    /// Completed think → act → observe rounds.
    pub turn_count: u32,
    /// Tool calls applied so far, including ones that returned an error message.
    pub operations_applied: usize,
    pub max_operations: usize,
    pub engine: TableEngine,
}

impl Default for CleanState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
            turn_count: 0,
            operations_applied: 0,
            max_operations: DEFAULT_MAX_OPERATIONS,
            engine: TableEngine::new(),
        }
    }
}

impl CleanState {
    /// Operations still allowed before the cap is reached.
    pub fn remaining_operations(&self) -> usize {
        self.max_operations.saturating_sub(self.operations_applied)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_operations() == 0
    }

    /// Last assistant message, usually the decision-maker's final summary.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_uses_default_cap_and_empty_engine() {
        let s = CleanState::default();
        assert_eq!(s.max_operations, DEFAULT_MAX_OPERATIONS);
        assert_eq!(s.remaining_operations(), 30);
        assert!(!s.is_exhausted());
        assert!(s.engine.table().is_none());
    }

    #[test]
    fn exhausted_when_operations_reach_cap() {
        let s = CleanState {
            operations_applied: 3,
            max_operations: 3,
            ..Default::default()
        };
        assert!(s.is_exhausted());
        let s = CleanState {
            max_operations: 0,
            ..Default::default()
        };
        assert!(s.is_exhausted());
    }

    #[test]
    fn last_assistant_reply_skips_user_messages() {
        let s = CleanState {
            messages: vec![
                Message::assistant("first"),
                Message::assistant("done"),
                Message::user("Tool `table_info` result:\n{}"),
            ],
            ..Default::default()
        };
        assert_eq!(s.last_assistant_reply(), Some("done"));
    }
}
