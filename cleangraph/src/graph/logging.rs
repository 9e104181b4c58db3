//! Structured logging helpers for graph execution events.

use tracing::{debug, error, info};

use crate::error::AgentError;

use super::Next;

pub fn log_node_start(node_id: &str) {
    debug!(node_id = node_id, "Starting node execution");
}

pub fn log_node_complete(node_id: &str, next: &Next) {
    debug!(node_id = node_id, ?next, "Node execution complete");
}

pub fn log_graph_start() {
    debug!("Starting graph execution");
}

/// Logged once per run with the number of node steps taken.
pub fn log_graph_complete(steps: usize) {
    info!(steps, "Graph execution complete");
}

pub fn log_graph_error(err: &AgentError) {
    error!(error = %err, "Graph execution error");
}
