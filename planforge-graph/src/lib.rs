//! # planforge-graph
//!
//! A small directed-graph workflow engine. A graph is a set of named nodes
//! connected by direct and conditional edges; execution threads a single
//! owned state value through the nodes strictly sequentially, re-evaluating
//! routing decisions after every step. Cycles are allowed and bounded by a
//! configurable step limit.
//!
//! The engine is generic over the state type, so pipelines work with their
//! own typed records instead of an untyped channel map.
//!
//! ```rust,ignore
//! let graph = StateGraph::new()
//!     .add_node_fn("charter", |state: ProjectState, _ctx| async move { Ok(state) })
//!     .add_edge(START, "charter")
//!     .add_edge("charter", END)
//!     .compile()?;
//!
//! let done = graph.invoke(initial, ExecutionConfig::new("proj-1")).await?;
//! ```

pub mod edge;
pub mod error;
pub mod executor;
pub mod graph;
pub mod node;

pub use edge::{Edge, EdgeTarget, RouterFn, END, START};
pub use error::{GraphError, Result};
pub use executor::SequentialExecutor;
pub use graph::{CompiledGraph, StateGraph};
pub use node::{ExecutionConfig, FunctionNode, Node, NodeContext};
