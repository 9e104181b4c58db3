//! Agent execution error types.
//!
//! Returned by graph nodes and the decision-maker when a step fails.

use thiserror::Error;

/// Error from one node run (decision-maker call, tool dispatch, graph wiring).
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed, tool error).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of ExecutionFailed contains the prefix and the message.
    #[test]
    fn agent_error_display_execution_failed() {
        let err = AgentError::ExecutionFailed("llm timeout".to_string());
        let s = err.to_string();
        assert!(s.contains("execution failed"), "{}", s);
        assert!(s.contains("llm timeout"), "{}", s);
    }
}
