//! Compiled state graph: immutable, supports invoke and stream.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AgentError;
use crate::stream::{StreamEvent, StreamMode};

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
use super::node_middleware::{NodeFuture, NodeMiddleware, NodeRunFn};
use super::{Next, Node, RunContext};

/// Compiled graph: runs from the first node and follows each node's [`Next`].
///
/// Cheap to clone (nodes are shared), so one compiled graph serves many runs.
pub struct CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) edge_order: Vec<String>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> Clone for CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            edge_order: self.edge_order.clone(),
            middleware: self.middleware.clone(),
        }
    }
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node ids in linear edge order.
    pub fn edge_order(&self) -> &[String] {
        &self.edge_order
    }

    async fn run_node(
        &self,
        node: Arc<dyn Node<S>>,
        node_id: &str,
        state: S,
        run_ctx: Option<&RunContext<S>>,
    ) -> Result<(S, Next), AgentError> {
        match &self.middleware {
            Some(middleware) => {
                let ctx = run_ctx.cloned();
                let inner: NodeRunFn<S> = Box::new(move |s: S| -> NodeFuture<S> {
                    Box::pin(async move {
                        match ctx.as_ref() {
                            Some(ctx) => node.run_with_context(s, ctx).await,
                            None => node.run(s).await,
                        }
                    })
                });
                middleware.around_run(node_id, state, inner).await
            }
            None => match run_ctx {
                Some(ctx) => node.run_with_context(state, ctx).await,
                None => node.run(state).await,
            },
        }
    }

    /// Shared loop for invoke and stream: steps through nodes until `Next::End`
    /// or the end of the edge order.
    async fn run_loop(
        &self,
        mut state: S,
        run_ctx: Option<&RunContext<S>>,
    ) -> Result<S, AgentError> {
        let mut current_id = self
            .edge_order
            .first()
            .cloned()
            .ok_or_else(|| AgentError::ExecutionFailed("empty graph".into()))?;
        log_graph_start();
        let mut steps = 0usize;

        loop {
            let node = self.nodes.get(&current_id).cloned().ok_or_else(|| {
                AgentError::ExecutionFailed(format!("node not found: {}", current_id))
            })?;
            log_node_start(&current_id);
            let (new_state, next) = self.run_node(node, &current_id, state, run_ctx).await?;
            state = new_state;
            steps += 1;
            log_node_complete(&current_id, &next);

            if let Some(ctx) = run_ctx {
                if let Some(tx) = &ctx.stream_tx {
                    if ctx.wants(StreamMode::Values) {
                        let _ = tx.send(StreamEvent::Values(state.clone())).await;
                    }
                    if ctx.wants(StreamMode::Updates) {
                        let _ = tx
                            .send(StreamEvent::Updates {
                                node_id: current_id.clone(),
                                state: state.clone(),
                            })
                            .await;
                    }
                }
            }

            match next {
                Next::End => break,
                Next::Node(id) => current_id = id,
                Next::Continue => {
                    let pos = self.edge_order.iter().position(|x| *x == current_id);
                    match pos.and_then(|p| self.edge_order.get(p + 1)) {
                        Some(id) => current_id = id.clone(),
                        None => break,
                    }
                }
            }
        }

        log_graph_complete(steps);
        Ok(state)
    }

    /// Runs the graph to completion and returns the final state.
    ///
    /// - `Next::Continue`: run the next node in edge order, or end if last.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        self.run_loop(state, None).await.inspect_err(log_graph_error)
    }

    /// Runs the graph on a spawned task, emitting events over a channel-backed stream.
    ///
    /// The stream ends when the run finishes. A failed run is logged and simply
    /// ends the stream; use [`stream_with_outcome`](Self::stream_with_outcome) to
    /// observe the error.
    pub fn stream(
        &self,
        state: S,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<S>> {
        self.stream_with_outcome(state, stream_mode).0
    }

    /// Like [`stream`](Self::stream), plus the handle of the spawned run whose
    /// output is the final state or the error that stopped the run.
    pub fn stream_with_outcome(
        &self,
        state: S,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> (ReceiverStream<StreamEvent<S>>, JoinHandle<Result<S, AgentError>>) {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let stream_mode: HashSet<StreamMode> = stream_mode.into();

        let handle = tokio::spawn(async move {
            let run_ctx = RunContext {
                stream_tx: Some(tx),
                stream_mode,
            };
            graph
                .run_loop(state, Some(&run_ctx))
                .await
                .inspect_err(log_graph_error)
        });

        (ReceiverStream::new(rx), handle)
    }
}
