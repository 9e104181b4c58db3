//! Test decision-makers.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;

use super::{LlmClient, LlmResponse};

/// Returns the same response on every turn.
///
/// With a tool call this is a decision-maker that never stops, useful for
/// checking the operation cap.
#[derive(Clone, Debug)]
pub struct MockLlm {
    response: LlmResponse,
}

impl MockLlm {
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            response: LlmResponse {
                content: content.into(),
                tool_calls,
            },
        }
    }

    /// Final answer right away, no tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::new(content, Vec::new())
    }

    /// Calls `name` with `arguments` every turn.
    pub fn always_calling(name: &str, arguments: &str) -> Self {
        Self::new("", vec![ToolCall::new(name, arguments)])
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        Ok(self.response.clone())
    }
}

/// Plays back queued turns in order, then answers `final_answer` with no tool calls
/// (or fails, see [`then_fail`](Self::then_fail)).
#[derive(Debug)]
pub struct ScriptedLlm {
    turns: Mutex<VecDeque<LlmResponse>>,
    final_answer: String,
    failure: Option<String>,
}

impl ScriptedLlm {
    pub fn new(turns: impl IntoIterator<Item = LlmResponse>) -> Self {
        Self {
            turns: Mutex::new(turns.into_iter().collect()),
            final_answer: "The table is clean.".to_string(),
            failure: None,
        }
    }

    /// One turn per call, each with a single tool call.
    pub fn from_calls<'a>(calls: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(calls.into_iter().map(|(name, args)| LlmResponse {
            content: String::new(),
            tool_calls: vec![ToolCall::new(name, args)],
        }))
    }

    pub fn with_final_answer(mut self, answer: impl Into<String>) -> Self {
        self.final_answer = answer.into();
        self
    }

    /// Once the queue is empty, every turn fails with `ExecutionFailed(message)`,
    /// like a decision-maker whose backend went away mid-run.
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Turns not yet played.
    pub fn remaining(&self) -> usize {
        self.turns.lock().map(|t| t.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let next = self
            .turns
            .lock()
            .map_err(|_| AgentError::ExecutionFailed("scripted llm lock poisoned".into()))?
            .pop_front();
        match (next, &self.failure) {
            (Some(turn), _) => Ok(turn),
            (None, Some(message)) => Err(AgentError::ExecutionFailed(message.clone())),
            (None, None) => Ok(LlmResponse {
                content: self.final_answer.clone(),
                tool_calls: Vec::new(),
            }),
        }
    }
}
