//! Shared run logic: build the cleaning graph with node logging and clean a batch.
//!
//! Used by [`run_with_config`](super::run_with_config) and by tests that inject
//! `MockLlm` / `ScriptedLlm`.

use std::io::Write;
use std::path::{Path, PathBuf};

use cleangraph::{
    build_clean_graph, clean_files, CleanState, CleaningRunner, LlmClient, PipelineState,
    StreamEvent, ToolSource,
};

use crate::config::RunConfig;
use crate::middleware::WithNodeLogging;

use super::Error;

/// Progress line for one stream event, if it is worth printing.
///
/// Act updates print each operation and the first line of its result; the final
/// think turn (no tool calls) prints the summary.
pub(crate) fn format_event(path: &Path, event: &StreamEvent<CleanState>) -> Option<String> {
    let StreamEvent::Updates { node_id, state } = event else {
        return None;
    };
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    match node_id.as_str() {
        "act" if !state.tool_results.is_empty() => Some(
            state
                .tool_results
                .iter()
                .map(|r| {
                    let first = r.content.lines().next().unwrap_or("");
                    format!(
                        "[{}] {} -> {}",
                        file,
                        r.name.as_deref().unwrap_or("?"),
                        first
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        "think" if state.tool_calls.is_empty() => state
            .last_assistant_reply()
            .map(|s| format!("[{}] done: {}", file, s)),
        _ => None,
    }
}

/// Compiles the cleaning graph (with node logging) and cleans `files`.
pub(crate) async fn run_clean_pipeline(
    files: &[PathBuf],
    llm: Box<dyn LlmClient>,
    tool_source: Box<dyn ToolSource>,
    config: &RunConfig,
) -> Result<PipelineState, Error> {
    let compiled = build_clean_graph(llm, tool_source)
        .with_node_logging()
        .compile()?;
    let runner = CleaningRunner::from_compiled(compiled).with_max_operations(config.max_operations);
    let state = PipelineState::new(files.to_vec(), &config.output_dir).with_debug(config.debug);

    if config.stream {
        let mut print = |path: &Path, event: &StreamEvent<CleanState>| {
            if let Some(line) = format_event(path, event) {
                let mut out = std::io::stdout();
                let _ = writeln!(out, "{}", line);
                let _ = out.flush();
            }
        };
        Ok(clean_files(&runner, state, Some(&mut print)).await)
    } else {
        Ok(clean_files(&runner, state, None).await)
    }
}
