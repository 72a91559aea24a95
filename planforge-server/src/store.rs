//! Project lifecycle bookkeeping.
//!
//! The pipeline itself never touches the store; persistence happens at
//! lifecycle boundaries only. A record is written once when a project is
//! accepted (Pending) and once more when the background run reaches a
//! terminal status.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use planforge_core::{PlanError, ProjectState, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a submitted project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Pending,
    Complete,
    Failed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "PENDING",
            ProjectStatus::Complete => "COMPLETE",
            ProjectStatus::Failed => "FAILED",
        }
    }
}

/// A stored project: the pipeline state plus host bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub state: ProjectState,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProjectRecord {
    pub fn pending(state: ProjectState) -> Self {
        Self { state, status: ProjectStatus::Pending, error_message: None }
    }

    pub fn complete(state: ProjectState) -> Self {
        Self { state, status: ProjectStatus::Complete, error_message: None }
    }

    pub fn failed(state: ProjectState, message: impl Into<String>) -> Self {
        Self { state, status: ProjectStatus::Failed, error_message: Some(message.into()) }
    }
}

/// Storage backend for project records, keyed by project id.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn put(&self, record: ProjectRecord) -> Result<()>;
    async fn get(&self, project_id: &str) -> Result<Option<ProjectRecord>>;
}

/// Process-local store.
pub struct InMemoryProjectStore {
    records: Arc<RwLock<HashMap<String, ProjectRecord>>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self { records: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn put(&self, record: ProjectRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PlanError::Store("project store lock poisoned".to_string()))?;
        records.insert(record.state.project_id.clone(), record);
        Ok(())
    }

    async fn get(&self, project_id: &str) -> Result<Option<ProjectRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| PlanError::Store("project store lock poisoned".to_string()))?;
        Ok(records.get(project_id).cloned())
    }
}
