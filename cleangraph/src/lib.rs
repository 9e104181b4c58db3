//! # cleangraph
//!
//! LLM-driven data cleaning over an in-memory table. A decision-maker (any
//! [`LlmClient`]) calls a fixed catalog of table operations in a bounded loop;
//! the engine holds the table, so only operation names and arguments cross the
//! model boundary.
//!
//! ## Main Modules
//!
//! - [`table`]: `Table`, typed cells, CSV/TSV/spreadsheet load and CSV save.
//! - [`engine`]: `TableEngine` and the operation catalog (inspect, rename, drop,
//!   dedupe, convert, missing values).
//! - [`tool_source`]: `ToolSource` trait; `TableToolSource` exposes the catalog as tools.
//! - [`llm`]: `LlmClient` trait, `MockLlm` / `ScriptedLlm`, and `ChatOpenAI` (feature `openai`).
//! - [`graph`]: `StateGraph` / `CompiledStateGraph`, nodes, middleware, streaming.
//! - [`react`]: `ThinkNode`, `ActNode`, `ObserveNode` and `CleaningRunner`.
//! - [`pipeline`]: batch cleaning of uploaded files into `cleaned_<name>` outputs.
//!
//! ## Features
//!
//! - `openai` (default): OpenAI-compatible chat via `async-openai`.
//!
//! ## Quick Start
//!
//! ```rust
//! use cleangraph::{CleaningRunner, ScriptedLlm, Table, TableEngine, TableToolSource};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let llm = ScriptedLlm::from_calls([("remove_duplicates", "{}")]);
//! let runner = CleaningRunner::new(Box::new(llm), Box::new(TableToolSource::new())).unwrap();
//! let engine = TableEngine::with_table(Table::from_text_records(
//!     ["id", "name"],
//!     [["1", "ann"], ["1", "ann"]],
//! ));
//! let state = runner.invoke(engine, "people.csv").await.unwrap();
//! assert_eq!(state.engine.table().map(|t| t.row_count()), Some(1));
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod pipeline;
pub mod react;
pub mod state;
pub mod stream;
pub mod table;
pub mod tool_source;

pub use engine::{Operation, OperationError, TableEngine};
pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, Next, Node, NodeFuture, NodeMiddleware, NodeRunFn,
    StateGraph,
};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use llm::{LlmClient, LlmResponse, MockLlm, ScriptedLlm, ToolChoiceMode};
pub use message::Message;
pub use pipeline::{
    clean_file, clean_files, CleanedFile, EventCallback, FileFailure, PipelineState,
    DEFAULT_OUTPUT_DIR,
};
pub use react::{
    build_clean_graph, build_clean_initial_state, ActNode, CleaningRunner, ObserveNode, RunError,
    ThinkNode, CLEANING_SYSTEM_PROMPT,
};
pub use state::{CleanState, ToolCall, ToolResult, DEFAULT_MAX_OPERATIONS};
pub use stream::{StreamEvent, StreamMode};
pub use table::{Table, TableError};
pub use tool_source::{
    MockToolSource, TableToolSource, ToolCallContent, ToolSource, ToolSourceError, ToolSpec,
};
