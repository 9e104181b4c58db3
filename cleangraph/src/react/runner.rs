//! Cleaning graph runner: graph build, initial state, invoke and stream.
//!
//! One [`CleaningRunner`] compiles think → act → observe once and is reused for
//! every file; each run gets a fresh [`CleanState`] owning that file's table.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_stream::StreamExt;

use crate::engine::{Operation, TableEngine, DEFAULT_PREVIEW_ROWS};
use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{CleanState, DEFAULT_MAX_OPERATIONS};
use crate::stream::{StreamEvent, StreamMode};
use crate::table::TableError;
use crate::tool_source::ToolSource;

use super::{ActNode, HandleToolErrors, ObserveNode, ThinkNode, CLEANING_SYSTEM_PROMPT};

/// Error from one file's cleaning run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
    #[error(transparent)]
    Execution(#[from] AgentError),
    #[error("table error: {0}")]
    Table(#[from] TableError),
    #[error("stream ended without final state")]
    StreamEndedWithoutState,
}

/// Fresh state for one file: system prompt plus a user message naming the file
/// and showing the first rows of the loaded table.
///
/// When `system_prompt` is `None`, uses [`CLEANING_SYSTEM_PROMPT`].
pub fn build_clean_initial_state(
    file_label: &str,
    mut engine: TableEngine,
    system_prompt: Option<&str>,
    max_operations: usize,
) -> CleanState {
    let sample = engine.apply(&Operation::Head {
        n: DEFAULT_PREVIEW_ROWS,
    });
    let prompt = system_prompt.unwrap_or(CLEANING_SYSTEM_PROMPT);
    CleanState {
        messages: vec![
            Message::system(prompt),
            Message::user(format!(
                "Please clean the data in the following file:\n{}\n\nData sample (first {} rows):\n{}",
                file_label, DEFAULT_PREVIEW_ROWS, sample
            )),
        ],
        max_operations,
        engine,
        ..Default::default()
    }
}

/// The think → act → observe graph, not yet compiled, so callers can attach
/// middleware before compiling.
///
/// Tool errors are turned into result text so a bad call never aborts a file.
pub fn build_clean_graph(
    llm: Box<dyn LlmClient>,
    tool_source: Box<dyn ToolSource>,
) -> StateGraph<CleanState> {
    let think = ThinkNode::new(llm);
    let act = ActNode::new(tool_source).with_handle_tool_errors(HandleToolErrors::Always(None));
    let observe = ObserveNode::with_loop();

    let mut graph = StateGraph::<CleanState>::new();
    graph
        .add_node("think", Arc::new(think))
        .add_node("act", Arc::new(act))
        .add_node("observe", Arc::new(observe))
        .add_edge(START, "think")
        .add_edge("think", "act")
        .add_edge("act", "observe")
        .add_edge("observe", END);
    graph
}

/// Compiled cleaning graph plus per-run settings.
///
/// # Example
///
/// ```ignore
/// let runner = CleaningRunner::new(llm, Box::new(TableToolSource::new()))?
///     .with_max_operations(10);
/// let state = runner.invoke(TableEngine::with_table(table), "people.csv").await?;
/// ```
pub struct CleaningRunner {
    compiled: CompiledStateGraph<CleanState>,
    system_prompt: Option<String>,
    max_operations: usize,
}

impl CleaningRunner {
    pub fn new(
        llm: Box<dyn LlmClient>,
        tool_source: Box<dyn ToolSource>,
    ) -> Result<Self, CompilationError> {
        Ok(Self::from_compiled(build_clean_graph(llm, tool_source).compile()?))
    }

    /// Runner over an already compiled graph (e.g. one built with middleware).
    pub fn from_compiled(compiled: CompiledStateGraph<CleanState>) -> Self {
        Self {
            compiled,
            system_prompt: None,
            max_operations: DEFAULT_MAX_OPERATIONS,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_operations(mut self, max_operations: usize) -> Self {
        self.max_operations = max_operations;
        self
    }

    pub fn max_operations(&self) -> usize {
        self.max_operations
    }

    fn initial_state(&self, engine: TableEngine, file_label: &str) -> CleanState {
        build_clean_initial_state(
            file_label,
            engine,
            self.system_prompt.as_deref(),
            self.max_operations,
        )
    }

    /// Runs the loop to completion over `engine`'s table.
    pub async fn invoke(
        &self,
        engine: TableEngine,
        file_label: &str,
    ) -> Result<CleanState, RunError> {
        let state = self.initial_state(engine, file_label);
        Ok(self.compiled.invoke(state).await?)
    }

    /// Streams the run and returns the final state once the run has finished.
    ///
    /// `on_event` sees every event, so callers can print each operation as it happens.
    /// A run that fails part way returns [`RunError::Execution`], even though the
    /// earlier nodes already emitted events.
    pub async fn stream_with_callback<F>(
        &self,
        engine: TableEngine,
        file_label: &str,
        mut on_event: Option<F>,
    ) -> Result<CleanState, RunError>
    where
        F: FnMut(&StreamEvent<CleanState>),
    {
        let state = self.initial_state(engine, file_label);
        let modes = HashSet::from([StreamMode::Updates, StreamMode::Values]);
        let (mut stream, outcome) = self.compiled.stream_with_outcome(state, modes);

        while let Some(event) = stream.next().await {
            if let Some(ref mut f) = on_event {
                f(&event);
            }
        }

        match outcome.await {
            Ok(result) => Ok(result?),
            Err(_) => Err(RunError::StreamEndedWithoutState),
        }
    }
}
