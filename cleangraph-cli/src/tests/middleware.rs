//! Unit tests for [`LoggingMiddleware`](crate::middleware::LoggingMiddleware) and
//! [`WithNodeLogging`](crate::middleware::WithNodeLogging).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cleangraph::{
    build_clean_graph, AgentError, CleanState, MockLlm, Next, NodeFuture, NodeMiddleware,
    TableToolSource,
};

use crate::middleware::{LoggingMiddleware, WithNodeLogging};

/// **Scenario**: around_run calls inner once and returns its result unchanged.
#[tokio::test]
async fn around_run_calls_inner_and_returns_result() {
    let called = Arc::new(AtomicBool::new(false));
    let flag = called.clone();
    let inner = Box::new(move |mut s: CleanState| -> NodeFuture<CleanState> {
        flag.store(true, Ordering::SeqCst);
        s.operations_applied += 1;
        Box::pin(async move { Ok((s, Next::Continue)) })
    });
    let (state, next) = LoggingMiddleware
        .around_run("act", CleanState::default(), inner)
        .await
        .unwrap();
    assert!(called.load(Ordering::SeqCst));
    assert_eq!(state.operations_applied, 1);
    assert_eq!(next, Next::Continue);
}

/// **Scenario**: An inner error is propagated.
#[tokio::test]
async fn around_run_propagates_error() {
    let inner = Box::new(|_s: CleanState| -> NodeFuture<CleanState> {
        Box::pin(async { Err(AgentError::ExecutionFailed("fail".into())) })
    });
    let result = LoggingMiddleware
        .around_run("think", CleanState::default(), inner)
        .await;
    match result {
        Err(AgentError::ExecutionFailed(msg)) => assert_eq!(msg, "fail"),
        _ => panic!("expected ExecutionFailed"),
    }
}

/// **Scenario**: A graph with node logging still compiles and runs to the final answer.
#[tokio::test]
async fn with_node_logging_keeps_graph_behaviour() {
    let compiled = build_clean_graph(
        Box::new(MockLlm::with_no_tool_calls("clean")),
        Box::new(TableToolSource::new()),
    )
    .with_node_logging()
    .compile()
    .unwrap();
    let out = compiled.invoke(CleanState::default()).await.unwrap();
    assert_eq!(out.last_assistant_reply(), Some("clean"));
    assert_eq!(out.operations_applied, 0);
}
