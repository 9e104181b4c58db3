//! Logging middleware: node enter/exit around each node run.

use async_trait::async_trait;
use tracing::debug;

use cleangraph::{AgentError, CleanState, Next, NodeMiddleware, NodeRunFn};

/// Logs node enter/exit (with the operation count) at debug level.
pub struct LoggingMiddleware;

#[async_trait]
impl NodeMiddleware<CleanState> for LoggingMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: CleanState,
        inner: NodeRunFn<CleanState>,
    ) -> Result<(CleanState, Next), AgentError> {
        debug!(node = node_id, operations = state.operations_applied, "node enter");
        let result = inner(state).await;
        match &result {
            Ok((s, next)) => debug!(
                node = node_id,
                operations = s.operations_applied,
                next = ?next,
                "node exit"
            ),
            Err(e) => debug!(node = node_id, error = %e, "node exit with error"),
        }
        result
    }
}
