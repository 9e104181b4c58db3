//! Build the OpenAI decision-maker from config and clean the batch. Does not read .env.

use std::path::PathBuf;

use async_openai::config::OpenAIConfig;
use cleangraph::{ChatOpenAI, LlmClient, PipelineState, TableToolSource, ToolSource};
use tracing::debug;

use crate::config::RunConfig;

use super::{run_clean_pipeline, Error};

/// Cleans `files` with the given config and returns the batch state.
pub async fn run_with_config(
    config: &RunConfig,
    files: &[PathBuf],
) -> Result<PipelineState, Error> {
    let tool_source: Box<dyn ToolSource> = Box::new(TableToolSource::new());

    let openai_config = OpenAIConfig::new()
        .with_api_base(&config.api_base)
        .with_api_key(config.api_key.clone());
    let mut llm =
        ChatOpenAI::new_with_tool_source(openai_config, config.model.clone(), tool_source.as_ref())
            .await?;
    if let Some(t) = config.temperature {
        llm = llm.with_temperature(t);
    }
    if let Some(tc) = config.tool_choice {
        llm = llm.with_tool_choice(tc);
    }
    debug!(
        model = %config.model,
        api_base = %config.api_base,
        max_operations = config.max_operations,
        "decision-maker ready"
    );
    let llm: Box<dyn LlmClient> = Box::new(llm);

    run_clean_pipeline(files, llm, tool_source, config).await
}
