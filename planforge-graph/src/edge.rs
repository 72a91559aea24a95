//! Edge types for graph control flow
//!
//! Edges define how execution flows between nodes.

use std::collections::HashMap;
use std::sync::Arc;

/// Special node identifiers
pub const START: &str = "__start__";
pub const END: &str = "__end__";

/// Target of an edge
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeTarget {
    /// Specific node
    Node(String),
    /// End of graph
    End,
}

impl EdgeTarget {
    /// Check if this is the END target
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Get the node name if this is a Node target
    pub fn node_name(&self) -> Option<&str> {
        match self {
            Self::Node(name) => Some(name),
            Self::End => None,
        }
    }
}

impl From<&str> for EdgeTarget {
    fn from(s: &str) -> Self {
        if s == END {
            Self::End
        } else {
            Self::Node(s.to_string())
        }
    }
}

/// Router function type. Routers must be pure: they read state and return a
/// route name without mutating anything, because they are re-evaluated on
/// every visit to their source node.
pub type RouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Edge type
pub enum Edge<S> {
    /// Entry edge: from START to the first node
    Entry { target: String },

    /// Direct edge: always go from source to target
    Direct { source: String, target: EdgeTarget },

    /// Conditional edge: route based on state
    Conditional {
        source: String,
        /// Router returns a route name looked up in `targets`
        router: RouterFn<S>,
        /// Map of route names to targets
        targets: HashMap<String, EdgeTarget>,
    },
}

impl<S> std::fmt::Debug for Edge<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry { target } => f.debug_struct("Entry").field("target", target).finish(),
            Self::Direct { source, target } => {
                f.debug_struct("Direct").field("source", source).field("target", target).finish()
            }
            Self::Conditional { source, targets, .. } => f
                .debug_struct("Conditional")
                .field("source", source)
                .field("targets", targets)
                .finish(),
        }
    }
}
