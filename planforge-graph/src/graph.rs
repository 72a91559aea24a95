//! StateGraph builder for constructing graphs

use crate::edge::{Edge, EdgeTarget, RouterFn, END, START};
use crate::error::{GraphError, Result};
use crate::node::{FunctionNode, Node, NodeContext};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Builder for constructing graphs
pub struct StateGraph<S> {
    /// Registered nodes
    pub nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Registered edges
    pub edges: Vec<Edge<S>>,
}

impl<S: Send + 'static> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send + 'static> StateGraph<S> {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self { nodes: HashMap::new(), edges: vec![] }
    }

    /// Add a node to the graph
    pub fn add_node<N: Node<S> + 'static>(mut self, node: N) -> Self {
        self.nodes.insert(node.name().to_string(), Arc::new(node));
        self
    }

    /// Add a function as a node
    pub fn add_node_fn<F, Fut>(self, name: &str, func: F) -> Self
    where
        F: Fn(S, NodeContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S>> + Send + 'static,
    {
        self.add_node(FunctionNode::new(name, func))
    }

    /// Add a direct edge from source to target. An edge from [`START`]
    /// becomes the graph's entry point.
    pub fn add_edge(mut self, source: &str, target: &str) -> Self {
        if source == START {
            self.edges.push(Edge::Entry { target: target.to_string() });
        } else {
            self.edges.push(Edge::Direct {
                source: source.to_string(),
                target: EdgeTarget::from(target),
            });
        }
        self
    }

    /// Add a conditional edge with a router function
    pub fn add_conditional_edges<F, I>(mut self, source: &str, router: F, targets: I) -> Self
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        let targets_map: HashMap<String, EdgeTarget> =
            targets.into_iter().map(|(k, v)| (k.to_string(), EdgeTarget::from(v))).collect();

        self.edges.push(Edge::Conditional {
            source: source.to_string(),
            router: Arc::new(router),
            targets: targets_map,
        });

        self
    }

    /// Compile the graph for execution
    pub fn compile(self) -> Result<CompiledGraph<S>> {
        self.validate()?;

        Ok(CompiledGraph { nodes: self.nodes, edges: self.edges })
    }

    /// Validate the graph structure
    fn validate(&self) -> Result<()> {
        let has_entry = self.edges.iter().any(|e| matches!(e, Edge::Entry { .. }));
        if !has_entry {
            return Err(GraphError::NoEntryPoint);
        }

        for edge in &self.edges {
            match edge {
                Edge::Entry { target } => {
                    if !self.nodes.contains_key(target) {
                        return Err(GraphError::EdgeTargetNotFound(target.clone()));
                    }
                }
                Edge::Direct { source, target } => {
                    if !self.nodes.contains_key(source) {
                        return Err(GraphError::NodeNotFound(source.clone()));
                    }
                    if let EdgeTarget::Node(name) = target {
                        if !self.nodes.contains_key(name) {
                            return Err(GraphError::EdgeTargetNotFound(name.clone()));
                        }
                    }
                }
                Edge::Conditional { source, targets, .. } => {
                    if !self.nodes.contains_key(source) {
                        return Err(GraphError::NodeNotFound(source.clone()));
                    }
                    for target in targets.values() {
                        if let EdgeTarget::Node(name) = target {
                            if !self.nodes.contains_key(name) {
                                return Err(GraphError::EdgeTargetNotFound(name.clone()));
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// A compiled graph ready for execution
pub struct CompiledGraph<S> {
    pub(crate) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(crate) edges: Vec<Edge<S>>,
}

impl<S: Send + 'static> CompiledGraph<S> {
    /// The entry node, if one was declared
    pub fn entry_node(&self) -> Option<&str> {
        self.edges.iter().find_map(|e| match e {
            Edge::Entry { target } => Some(target.as_str()),
            _ => None,
        })
    }

    /// Resolve the node that follows `current`, re-evaluating any router
    /// against the current state. `Ok(None)` means execution reaches END.
    pub fn next_node(&self, current: &str, state: &S) -> Result<Option<String>> {
        for edge in &self.edges {
            match edge {
                Edge::Direct { source, target } if source == current => {
                    return Ok(match target {
                        EdgeTarget::Node(name) => Some(name.clone()),
                        EdgeTarget::End => None,
                    });
                }
                Edge::Conditional { source, router, targets } if source == current => {
                    let route = router(state);
                    if route == END {
                        return Ok(None);
                    }
                    return match targets.get(&route) {
                        Some(EdgeTarget::Node(name)) => Ok(Some(name.clone())),
                        Some(EdgeTarget::End) => Ok(None),
                        None => Err(GraphError::UnknownRouteTarget(route)),
                    };
                }
                _ => {}
            }
        }

        // A node with no outgoing edge terminates the run.
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_graph_construction() {
        let graph = StateGraph::<i64>::new()
            .add_node_fn("process", |state, _ctx| async move { Ok(state) })
            .add_edge(START, "process")
            .add_edge("process", END)
            .compile();

        assert!(graph.is_ok());
    }

    #[test]
    fn test_graph_missing_entry() {
        let graph = StateGraph::<i64>::new()
            .add_node_fn("process", |state, _ctx| async move { Ok(state) })
            .add_edge("process", END) // No START -> process edge
            .compile();

        assert!(matches!(graph, Err(GraphError::NoEntryPoint)));
    }

    #[test]
    fn test_graph_missing_node() {
        let graph = StateGraph::<i64>::new().add_edge(START, "nonexistent").compile();

        assert!(matches!(graph, Err(GraphError::EdgeTargetNotFound(_))));
    }

    #[test]
    fn test_conditional_edge_routing() {
        let graph = StateGraph::<i64>::new()
            .add_node_fn("router", |state, _ctx| async move { Ok(state) })
            .add_node_fn("small", |state, _ctx| async move { Ok(state) })
            .add_node_fn("large", |state, _ctx| async move { Ok(state) })
            .add_edge(START, "router")
            .add_conditional_edges(
                "router",
                |state: &i64| if *state < 10 { "small".to_string() } else { "large".to_string() },
                [("small", "small"), ("large", "large")],
            )
            .compile()
            .unwrap();

        assert_eq!(graph.next_node("router", &3).unwrap(), Some("small".to_string()));
        assert_eq!(graph.next_node("router", &30).unwrap(), Some("large".to_string()));
    }

    #[test]
    fn test_unknown_route_is_error() {
        let graph = StateGraph::<i64>::new()
            .add_node_fn("router", |state, _ctx| async move { Ok(state) })
            .add_edge(START, "router")
            .add_conditional_edges("router", |_: &i64| "missing".to_string(), [(END, END)])
            .compile()
            .unwrap();

        assert!(matches!(
            graph.next_node("router", &0),
            Err(GraphError::UnknownRouteTarget(_))
        ));
    }
}
