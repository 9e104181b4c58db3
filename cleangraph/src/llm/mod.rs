//! Decision-maker boundary for the Think node.
//!
//! The cleaning loop asks an [`LlmClient`] for the next step: assistant text plus
//! zero or more tool calls. An empty `tool_calls` list means "done".

mod mock;

#[cfg(feature = "openai")]
mod openai;

pub use mock::{MockLlm, ScriptedLlm};

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;

/// Tool choice mode for chat completions: when tools are present, controls whether
/// the model may choose (auto), must not use (none), or must use (required).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToolChoiceMode {
    #[default]
    Auto,
    None,
    Required,
}

impl std::str::FromStr for ToolChoiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            "required" => Ok(Self::Required),
            _ => Err(format!(
                "unknown tool_choice: {} (use auto, none, or required)",
                s
            )),
        }
    }
}

/// One decision: assistant text and the tool calls to apply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmResponse {
    pub content: String,
    /// Empty means the decision-maker considers the table clean.
    pub tool_calls: Vec<ToolCall>,
}

/// Decision-maker: given the conversation so far, returns the next step.
///
/// Implementations: [`MockLlm`] (same response every turn), [`ScriptedLlm`]
/// (queued turns, then a final answer), `ChatOpenAI` (feature `openai`).
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
