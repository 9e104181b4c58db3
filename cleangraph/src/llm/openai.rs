//! OpenAI Chat Completions decision-maker (`ChatOpenAI`).
//!
//! Works with any OpenAI-compatible endpoint. The cleaning catalog is sent as
//! function tools; each tool call in the reply becomes one [`ToolCall`].

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;
use crate::tool_source::{ToolSource, ToolSpec};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, ChatCompletionTool,
        ChatCompletionToolChoiceOption, ChatCompletionTools, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, FunctionObject, ToolChoiceOptions,
    },
    Client,
};

use super::ToolChoiceMode;

/// OpenAI Chat Completions client implementing [`LlmClient`].
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
    tool_choice: Option<ToolChoiceMode>,
}

impl ChatOpenAI {
    /// Client with default config (API key from `OPENAI_API_KEY`).
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_config(OpenAIConfig::new(), model)
    }

    /// Client with explicit config (API key, base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            tools: None,
            temperature: None,
            tool_choice: None,
        }
    }

    /// Client whose tools are everything `tool_source` lists.
    pub async fn new_with_tool_source(
        config: OpenAIConfig,
        model: impl Into<String>,
        tool_source: &dyn ToolSource,
    ) -> Result<Self, AgentError> {
        let tools = tool_source
            .list_tools()
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("list_tools failed: {}", e)))?;
        Ok(Self::with_config(config, model).with_tools(tools))
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Sampling temperature (0–2).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_tool_choice(mut self, mode: ToolChoiceMode) -> Self {
        self.tool_choice = Some(mode);
        self
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => ChatCompletionRequestMessage::Assistant(s.as_str().into()),
            })
            .collect()
    }

    fn chat_tools(tools: &[ToolSpec]) -> Vec<ChatCompletionTools> {
        tools
            .iter()
            .map(|t| {
                ChatCompletionTools::Function(ChatCompletionTool {
                    function: FunctionObject {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: Some(t.input_schema.clone()),
                        ..Default::default()
                    },
                })
            })
            .collect()
    }
}

impl From<ToolChoiceMode> for ChatCompletionToolChoiceOption {
    fn from(mode: ToolChoiceMode) -> Self {
        ChatCompletionToolChoiceOption::Mode(match mode {
            ToolChoiceMode::Auto => ToolChoiceOptions::Auto,
            ToolChoiceMode::None => ToolChoiceOptions::None,
            ToolChoiceMode::Required => ToolChoiceOptions::Required,
        })
    }
}

impl ChatOpenAI {
    /// One request for the next decision: whole conversation plus the catalog.
    fn build_request(
        &self,
        messages: &[Message],
    ) -> Result<CreateChatCompletionRequest, AgentError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone())
            .messages(Self::messages_to_request(messages));
        if let Some(tools) = self.tools.as_deref().filter(|t| !t.is_empty()) {
            args.tools(Self::chat_tools(tools));
            // The engine applies calls in order; ask for one decision at a time.
            args.parallel_tool_calls(false);
        }
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        if let Some(mode) = self.tool_choice {
            args.tool_choice(mode);
        }
        args.build()
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e)))
    }

    /// Function calls of the reply, in order; other call kinds are ignored.
    fn decision_from(calls: Option<Vec<ChatCompletionMessageToolCalls>>) -> Vec<ToolCall> {
        calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| match tc {
                ChatCompletionMessageToolCalls::Function(f) => Some(ToolCall {
                    name: f.function.name,
                    arguments: f.function.arguments,
                    id: Some(f.id),
                }),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let request = self.build_request(messages)?;
        debug!(model = %self.model, messages = messages.len(), "chat completion request");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;
        let Some(choice) = response.choices.into_iter().next() else {
            return Err(AgentError::ExecutionFailed("OpenAI returned no choices".into()));
        };

        let tool_calls = Self::decision_from(choice.message.tool_calls);
        debug!(tool_calls = tool_calls.len(), "decision received");
        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
        })
    }
}
