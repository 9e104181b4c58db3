//! Graph compilation error.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// Returned by `StateGraph::compile()`. Every id in edges (except START/END)
/// must exist in the node map and edges must form one linear chain from START
/// to END.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// An edge references an id that was never added with `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge from START, or more than one.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// No edge to END, or more than one.
    #[error("graph must have exactly one edge to END")]
    MissingEnd,

    /// Branch, merge, cycle or a chain that does not reach END.
    #[error("edges must form a single linear chain from START to END: {0}")]
    InvalidChain(String),
}
