//! Extension trait: attach node logging middleware, then compile.

use std::sync::Arc;

use cleangraph::{CleanState, StateGraph};

use super::logging::LoggingMiddleware;

/// Returns the same graph with [`LoggingMiddleware`] attached. Chain with `.compile()?`.
pub trait WithNodeLogging {
    fn with_node_logging(self) -> Self;
}

impl WithNodeLogging for StateGraph<CleanState> {
    fn with_node_logging(self) -> Self {
        self.with_middleware(Arc::new(LoggingMiddleware))
    }
}
