//! # planforge-pipeline
//!
//! The multi-stage generation pipeline that turns a project description into
//! a complete set of project-management documents: charter, scope, work
//! breakdown structure, risk register, schedule, stakeholder analysis and
//! communication plan.
//!
//! Stages run strictly sequentially on a directed graph with one cycle: the
//! WBS loop, which expands each Scope deliverable into its own work
//! breakdown sub-tree. Each stage reads the accumulated [`ProjectState`],
//! calls a capability, validates the result, and writes exactly one
//! document slot. Failure handling is stage-local: the charter and WBS
//! agent abort the run, the scope stage retries, and the risk and schedule
//! stages degrade to documented fallbacks.
//!
//! ```rust,ignore
//! let pipeline = Pipeline::new(generator, search)?;
//! let state = ProjectState::new(Uuid::new_v4().to_string(), input);
//! let done = pipeline.run(state).await?;
//! assert!(done.documents.schedule.is_some());
//! ```
//!
//! [`ProjectState`]: planforge_core::ProjectState

pub mod pipeline;
pub mod stages;

pub use pipeline::Pipeline;
pub use stages::risk::parse_risk_text;
pub use stages::schedule::{build_schedule, flatten_wbs, FlatTask};
