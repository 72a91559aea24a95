//! # planforge-core
//!
//! Shared types and contracts for the Planforge project-management document
//! pipeline: the project state record threaded through the generation graph,
//! the typed document kinds, and the capability traits that abstract over
//! external text-generation and web-search services.

pub mod capability;
pub mod documents;
pub mod error;
pub mod input;
pub mod state;

pub use capability::{TextGenerator, WebSearch};
pub use documents::{
    Charter, CommunicationItem, CommunicationPlan, DurationEstimation, GanttTask, RiskItem,
    RiskRegister, Schedule, Scope, StakeholderAnalysis, StakeholderItem, StructuredDocument,
    TaskDuration, Wbs, WbsItem,
};
pub use error::{PlanError, Result};
pub use input::ProjectInput;
pub use state::{DocumentKind, Documents, ProjectState};
