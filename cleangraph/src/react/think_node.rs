//! Think node: ask the decision-maker for the next step.

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::CleanState;

/// Reads `state.messages`, calls the decision-maker, appends one assistant
/// message and sets `state.tool_calls` from the response.
pub struct ThinkNode {
    llm: Box<dyn LlmClient>,
}

impl ThinkNode {
    pub fn new(llm: Box<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<CleanState> for ThinkNode {
    fn id(&self) -> &str {
        "think"
    }

    async fn run(&self, mut state: CleanState) -> Result<(CleanState, Next), AgentError> {
        let response = self.llm.invoke(&state.messages).await?;
        debug!(
            turn = state.turn_count,
            tool_calls = response.tool_calls.len(),
            "decision received"
        );
        state.messages.push(Message::Assistant(response.content));
        state.tool_calls = response.tool_calls;
        Ok((state, Next::Continue))
    }
}
