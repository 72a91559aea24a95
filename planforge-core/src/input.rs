//! The immutable project creation request.

use crate::{PlanError, Result};
use serde::{Deserialize, Serialize};

/// Parameters supplied once at project creation. Required fields are the
/// title, description and project type; everything else is optional context
/// that enriches the generation prompts when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    /// The official name of the project.
    pub project_title: String,
    /// A detailed description of the project's purpose and goals.
    pub project_description: String,
    /// The category of the project (e.g. Software Development, Construction).
    pub project_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_stakeholders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_objectives: Option<Vec<String>>,
    /// Estimated duration, e.g. "6 months".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_duration: Option<String>,
    /// Estimated budget range, e.g. "$100,000 - $250,000".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    /// Estimated team size, e.g. "8-12 members".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<String>,
}

impl ProjectInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        project_type: impl Into<String>,
    ) -> Self {
        Self {
            project_title: title.into(),
            project_description: description.into(),
            project_type: project_type.into(),
            key_stakeholders: None,
            project_objectives: None,
            project_duration: None,
            budget_range: None,
            team_size: None,
            constraints: None,
            assumptions: None,
        }
    }

    /// Title and description must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.project_title.trim().is_empty() {
            return Err(PlanError::Validation("project_title must not be empty".to_string()));
        }
        if self.project_description.trim().is_empty() {
            return Err(PlanError::Validation(
                "project_description must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_stakeholders(mut self, stakeholders: Vec<String>) -> Self {
        self.key_stakeholders = Some(stakeholders);
        self
    }

    pub fn with_objectives(mut self, objectives: Vec<String>) -> Self {
        self.project_objectives = Some(objectives);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let input = ProjectInput::new("CRM Rollout", "Replace the legacy CRM", "Software");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let input = ProjectInput::new("   ", "Replace the legacy CRM", "Software");
        assert!(matches!(input.validate(), Err(PlanError::Validation(_))));
    }

    #[test]
    fn test_empty_description_rejected() {
        let input = ProjectInput::new("CRM Rollout", "", "Software");
        assert!(matches!(input.validate(), Err(PlanError::Validation(_))));
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let input = ProjectInput::new("CRM Rollout", "Replace the legacy CRM", "Software");
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("key_stakeholders").is_none());
        assert_eq!(json["project_title"], "CRM Rollout");
    }
}
