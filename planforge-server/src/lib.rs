//! # planforge-server
//!
//! HTTP host for the Planforge pipeline. Accepting a project returns 202
//! immediately; the pipeline runs on a detached background task and the
//! client polls `/api/projects/{id}/status` until it reaches a terminal
//! status, then downloads individual documents as markdown attachments.

pub mod config;
pub mod render;
pub mod rest;
pub mod store;

pub use config::{SecurityConfig, ServerConfig};
pub use rest::{create_app, ProjectsController};
pub use store::{InMemoryProjectStore, ProjectRecord, ProjectStatus, ProjectStore};
