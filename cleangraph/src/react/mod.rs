//! Cleaning loop nodes: Think, Act, Observe, and the runner that wires them.
//!
//! The graph is think → act → observe; observe jumps back to think until the
//! decision-maker stops calling tools or the operation cap is reached.

mod act_node;
mod observe_node;
mod runner;
mod think_node;

pub use act_node::{ActNode, ErrorHandlerFn, HandleToolErrors, DEFAULT_EXECUTION_ERROR_TEMPLATE};
pub use observe_node::ObserveNode;
pub use runner::{build_clean_graph, build_clean_initial_state, CleaningRunner, RunError};
pub use think_node::ThinkNode;

/// System prompt for the cleaning decision-maker.
///
/// Prepended as the first message by [`build_clean_initial_state`]; callers can
/// pass a different prompt through [`CleaningRunner::with_system_prompt`].
pub const CLEANING_SYSTEM_PROMPT: &str = r#"You are an expert data cleaning assistant. Your task is to analyze the provided data sample and clean the table using the available tools.

Available work: renaming columns, dropping columns, removing duplicate rows, converting column types, and handling missing values. Decide which of these the data needs.

RULES:
1. The table is held for you. Never pass table data to a tool; call tools by name with their arguments only.
2. Inspection tools (table_head, table_tail, table_info, table_describe) describe the current table. Use them to decide.
3. Cleaning tools modify the table in place and return a status message. Read it before the next step.
4. Call one tool at a time and check its result.
5. When the table is clean, reply with a short summary of what you changed and call no tools. The cleaned table is saved automatically.

You have a limited number of tool calls per file; do not waste them."#;
