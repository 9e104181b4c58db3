//! State graph: nodes + linear edges, compile and invoke.
//!
//! Add nodes and edges, compile, then invoke or stream with a state value. Nodes
//! can steer execution with [`Next`] (jump back to `think`, or end early).

mod compile_error;
mod compiled;
pub mod logging;
mod next;
mod node;
mod node_middleware;
mod run_context;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use next::Next;
pub use node::Node;
pub use node_middleware::{NodeFuture, NodeMiddleware, NodeRunFn};
pub use run_context::RunContext;
pub use state_graph::{StateGraph, END, START};
