//! Routing decision returned by a node.

/// What the graph runs after a node completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Next {
    /// Follow the linear edge order; ends after the last node.
    Continue,
    /// Jump to the node with this id.
    Node(String),
    /// Stop and return the current state.
    End,
}
