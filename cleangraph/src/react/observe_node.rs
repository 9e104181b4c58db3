//! Observe node: feed tool results back into the conversation and decide
//! whether the loop goes on.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::CleanState;

/// Appends one user message per tool result, clears the per-turn fields and
/// increments `turn_count`.
///
/// Routing with [`ObserveNode::with_loop`]: ends when the turn had no tool calls
/// or the operation cap is reached, otherwise jumps back to `think`. Without
/// the loop it always continues along the edge order.
#[derive(Debug, Clone)]
pub struct ObserveNode {
    loop_target: Option<String>,
}

impl Default for ObserveNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ObserveNode {
    /// Single pass: always `Next::Continue`.
    pub fn new() -> Self {
        Self { loop_target: None }
    }

    /// Loops back to the `think` node until done.
    pub fn with_loop() -> Self {
        Self {
            loop_target: Some("think".to_string()),
        }
    }
}

/// Message text fed back to the decision-maker for one tool result.
pub(crate) fn tool_result_message(name: Option<&str>, content: &str) -> String {
    format!("Tool `{}` result:\n{}", name.unwrap_or("unknown"), content)
}

#[async_trait]
impl Node<CleanState> for ObserveNode {
    fn id(&self) -> &str {
        "observe"
    }

    async fn run(&self, mut state: CleanState) -> Result<(CleanState, Next), AgentError> {
        let had_tool_calls = !state.tool_calls.is_empty();
        for r in state.tool_results.drain(..) {
            state
                .messages
                .push(Message::User(tool_result_message(r.name.as_deref(), &r.content)));
        }
        state.tool_calls.clear();
        state.turn_count += 1;

        let Some(target) = &self.loop_target else {
            return Ok((state, Next::Continue));
        };
        if !had_tool_calls {
            debug!(turn = state.turn_count, "no tool calls; loop done");
            return Ok((state, Next::End));
        }
        if state.is_exhausted() {
            info!(
                operations = state.operations_applied,
                max_operations = state.max_operations,
                "operation cap reached; stopping"
            );
            return Ok((state, Next::End));
        }
        Ok((state, Next::Node(target.clone())))
    }
}
