//! Streaming types for graph runs.
//!
//! Used by `CompiledStateGraph::stream` to report progress after every node.

use std::fmt::Debug;

/// Stream mode selector: which kinds of events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Full state after each node completes.
    Values,
    /// Node id plus the state after that node.
    Updates,
}

/// Event emitted while running a graph.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    Values(S),
    Updates { node_id: String, state: S },
}

impl<S> StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// State carried by the event.
    pub fn state(&self) -> &S {
        match self {
            Self::Values(s) | Self::Updates { state: s, .. } => s,
        }
    }
}
