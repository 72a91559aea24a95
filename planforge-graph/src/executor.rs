//! Sequential execution engine for compiled graphs.
//!
//! Exactly one node runs at a time; routing decisions are re-evaluated
//! against the freshly updated state after every step. This matches the
//! pipeline's concurrency model: one writer, no locking, no re-entrancy.

use crate::error::{GraphError, Result};
use crate::graph::CompiledGraph;
use crate::node::{ExecutionConfig, NodeContext};

/// Sequential executor for graphs
pub struct SequentialExecutor<'a, S> {
    graph: &'a CompiledGraph<S>,
    config: ExecutionConfig,
}

impl<'a, S: Send + 'static> SequentialExecutor<'a, S> {
    pub fn new(graph: &'a CompiledGraph<S>, config: ExecutionConfig) -> Self {
        Self { graph, config }
    }

    /// Run the graph to completion, threading the state through each node
    /// in turn until an edge reaches END or the step budget runs out.
    pub async fn run(&self, input: S) -> Result<S> {
        let mut state = input;
        let mut current =
            self.graph.entry_node().map(str::to_string).ok_or(GraphError::NoEntryPoint)?;
        let mut step = 0usize;

        loop {
            if step >= self.config.recursion_limit {
                return Err(GraphError::RecursionLimitExceeded(step));
            }

            let node = self
                .graph
                .nodes
                .get(&current)
                .ok_or_else(|| GraphError::NodeNotFound(current.clone()))?;

            tracing::debug!(run_id = %self.config.run_id, node = %current, step, "executing node");

            let ctx = NodeContext::new(self.config.clone(), step);
            state = node.execute(state, &ctx).await.map_err(|e| {
                tracing::error!(run_id = %self.config.run_id, node = %current, error = %e, "node failed");
                GraphError::NodeExecutionFailed { node: current.clone(), message: e.to_string() }
            })?;

            step += 1;

            match self.graph.next_node(&current, &state)? {
                Some(next) => current = next,
                None => break,
            }
        }

        Ok(state)
    }
}

impl<S: Send + 'static> CompiledGraph<S> {
    /// Execute the graph to completion with the given input state
    pub async fn invoke(&self, input: S, config: ExecutionConfig) -> Result<S> {
        SequentialExecutor::new(self, config).run(input).await
    }
}
