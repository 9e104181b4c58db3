//! Middleware wrapping each node run.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

use crate::error::AgentError;

use super::Next;

/// Boxed future of one node run.
pub type NodeFuture<S> = Pin<Box<dyn Future<Output = Result<(S, Next), AgentError>> + Send>>;

/// The wrapped node run, handed to [`NodeMiddleware::around_run`].
pub type NodeRunFn<S> = Box<dyn FnOnce(S) -> NodeFuture<S> + Send>;

/// Wraps every node run of a compiled graph (e.g. enter/exit logging).
///
/// Implementations must call `inner` exactly once to actually run the node.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: Send + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<(S, Next), AgentError>;
}
