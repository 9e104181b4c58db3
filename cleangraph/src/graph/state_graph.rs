//! State graph builder: nodes + explicit edges (from → to).
//!
//! Add nodes with `add_node`, define the chain with `add_edge(from, to)` using
//! `START` and `END` for entry and exit, then `compile` to get a
//! [`CompiledStateGraph`].

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use super::compile_error::CompilationError;
use super::compiled::CompiledStateGraph;
use super::node::Node;
use super::node_middleware::NodeMiddleware;

/// Sentinel for graph entry: `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// State graph: nodes plus explicit edges, generic over the state type `S`.
///
/// Nodes can still jump with `Next::Node(id)` at run time; edges only fix the
/// default order used by `Next::Continue`.
pub struct StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, String)>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            middleware: None,
        }
    }

    /// Adds a node; replaces any node with the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds an edge from `from_id` to `to_id` (`START` / `END` for entry and exit).
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Attaches middleware that wraps every node run of the compiled graph.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Validates edges and builds the executable graph.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }

        let mut starts = self.edges.iter().filter(|(f, _)| f == START).map(|(_, t)| t);
        let first = match (starts.next(), starts.next()) {
            (Some(first), None) => first.clone(),
            _ => return Err(CompilationError::MissingStart),
        };
        let mut ends = self.edges.iter().filter(|(_, t)| t == END).map(|(f, _)| f);
        let expected_last = match (ends.next(), ends.next()) {
            (Some(last), None) => last.clone(),
            _ => return Err(CompilationError::MissingEnd),
        };

        let mut next_map: HashMap<&str, &str> = HashMap::new();
        let mut targets: HashSet<&str> = HashSet::new();
        for (from, to) in &self.edges {
            if from != START && next_map.insert(from.as_str(), to.as_str()).is_some() {
                return Err(CompilationError::InvalidChain(format!(
                    "node '{}' has more than one outgoing edge",
                    from
                )));
            }
            if to != END && !targets.insert(to.as_str()) {
                return Err(CompilationError::InvalidChain(format!(
                    "node '{}' has more than one incoming edge",
                    to
                )));
            }
        }

        let mut edge_order = vec![first.clone()];
        let mut visited: HashSet<String> = HashSet::from([first.clone()]);
        let mut current = first;
        loop {
            let Some(next) = next_map.get(current.as_str()) else {
                return Err(CompilationError::InvalidChain(format!(
                    "chain stops at '{}' before reaching END",
                    current
                )));
            };
            if *next == END {
                if current != expected_last {
                    return Err(CompilationError::InvalidChain(
                        "chain tail does not match the single edge to END".into(),
                    ));
                }
                break;
            }
            if !visited.insert(next.to_string()) {
                return Err(CompilationError::InvalidChain("cycle detected".into()));
            }
            edge_order.push(next.to_string());
            current = next.to_string();
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            edge_order,
            middleware: self.middleware,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::AgentError;
    use crate::graph::Next;

    struct Noop(&'static str);

    #[async_trait]
    impl Node<i32> for Noop {
        fn id(&self) -> &str {
            self.0
        }
        async fn run(&self, state: i32) -> Result<(i32, Next), AgentError> {
            Ok((state, Next::Continue))
        }
    }

    fn graph_with(ids: &[&'static str]) -> StateGraph<i32> {
        let mut g = StateGraph::<i32>::new();
        for id in ids {
            g.add_node(*id, Arc::new(Noop(id)));
        }
        g
    }

    /// **Scenario**: Edge to an unregistered node fails with NodeNotFound.
    #[test]
    fn compile_rejects_unknown_node() {
        let mut g = graph_with(&["a"]);
        g.add_edge(START, "a").add_edge("a", "ghost").add_edge("ghost", END);
        assert_eq!(
            g.compile().err(),
            Some(CompilationError::NodeNotFound("ghost".into()))
        );
    }

    /// **Scenario**: Zero or two edges from START fail with MissingStart.
    #[test]
    fn compile_requires_exactly_one_start() {
        let mut g = graph_with(&["a"]);
        g.add_edge("a", END);
        assert_eq!(g.compile().err(), Some(CompilationError::MissingStart));

        let mut g = graph_with(&["a", "b"]);
        g.add_edge(START, "a").add_edge(START, "b").add_edge("a", END);
        assert_eq!(g.compile().err(), Some(CompilationError::MissingStart));
    }

    /// **Scenario**: No edge to END fails with MissingEnd.
    #[test]
    fn compile_requires_exactly_one_end() {
        let mut g = graph_with(&["a"]);
        g.add_edge(START, "a");
        assert_eq!(g.compile().err(), Some(CompilationError::MissingEnd));
    }

    /// **Scenario**: Branch and cycle are rejected as InvalidChain.
    #[test]
    fn compile_rejects_branch_and_cycle() {
        let mut g = graph_with(&["a", "b", "c"]);
        g.add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("a", "c")
            .add_edge("c", END);
        assert!(matches!(g.compile(), Err(CompilationError::InvalidChain(_))));

        let mut g = graph_with(&["a", "b", "c"]);
        g.add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", "a")
            .add_edge("c", END);
        assert!(matches!(g.compile(), Err(CompilationError::InvalidChain(_))));
    }

    /// **Scenario**: A valid chain compiles with nodes in edge order.
    #[test]
    fn compile_linear_chain_keeps_edge_order() {
        let mut g = graph_with(&["think", "act", "observe"]);
        g.add_edge(START, "think")
            .add_edge("think", "act")
            .add_edge("act", "observe")
            .add_edge("observe", END);
        let compiled = g.compile().unwrap();
        assert_eq!(compiled.edge_order(), ["think", "act", "observe"]);
    }
}
