//! Node types for graph execution
//!
//! Nodes are the computational units in a graph. They take ownership of the
//! state, transform it, and hand it back.

use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// Configuration for one graph execution
#[derive(Clone)]
pub struct ExecutionConfig {
    /// Identifier for this run, used in logs
    pub run_id: String,
    /// Step budget for cyclic graphs
    pub recursion_limit: usize,
}

impl ExecutionConfig {
    pub fn new(run_id: &str) -> Self {
        Self { run_id: run_id.to_string(), recursion_limit: 100 }
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::new(&uuid::Uuid::new_v4().to_string())
    }
}

/// Context passed to nodes during execution
#[derive(Clone)]
pub struct NodeContext {
    /// Configuration for this execution
    pub config: ExecutionConfig,
    /// Current step number
    pub step: usize,
}

impl NodeContext {
    pub fn new(config: ExecutionConfig, step: usize) -> Self {
        Self { config, step }
    }
}

/// A node in the graph
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Send + 'static,
{
    /// Node identifier
    fn name(&self) -> &str;

    /// Execute the node, consuming the state and returning the updated state
    async fn execute(&self, state: S, ctx: &NodeContext) -> Result<S>;
}

/// Type alias for the boxed async function backing a [`FunctionNode`]
pub type AsyncNodeFn<S> =
    Box<dyn Fn(S, NodeContext) -> Pin<Box<dyn Future<Output = Result<S>> + Send>> + Send + Sync>;

/// Function node - wraps an async function as a node
pub struct FunctionNode<S> {
    name: String,
    func: AsyncNodeFn<S>,
}

impl<S: Send + 'static> FunctionNode<S> {
    /// Create a new function node
    pub fn new<F, Fut>(name: &str, func: F) -> Self
    where
        F: Fn(S, NodeContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S>> + Send + 'static,
    {
        Self { name: name.to_string(), func: Box::new(move |state, ctx| Box::pin(func(state, ctx))) }
    }
}

#[async_trait]
impl<S: Send + 'static> Node<S> for FunctionNode<S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, state: S, ctx: &NodeContext) -> Result<S> {
        (self.func)(state, ctx.clone()).await
    }
}

/// Passthrough node - returns the state unchanged
pub struct PassthroughNode {
    name: String,
}

impl PassthroughNode {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

#[async_trait]
impl<S: Send + 'static> Node<S> for PassthroughNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, state: S, _ctx: &NodeContext) -> Result<S> {
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_function_node() {
        let node = FunctionNode::new("double", |state: i64, _ctx| async move { Ok(state * 2) });

        assert_eq!(node.name(), "double");

        let ctx = NodeContext::new(ExecutionConfig::default(), 0);
        let result = node.execute(21, &ctx).await.unwrap();
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn test_passthrough_node() {
        let node = PassthroughNode::new("pass");
        let ctx = NodeContext::new(ExecutionConfig::default(), 0);
        let result: i64 = node.execute(7, &ctx).await.unwrap();
        assert_eq!(result, 7);
    }
}
