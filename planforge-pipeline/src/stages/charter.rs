//! Charter generation. First stage; any failure here is fatal because the
//! rest of the pipeline derives from the charter.

use super::generate_document;
use planforge_core::{Charter, ProjectState, Result, TextGenerator};

const CHARTER_INSTRUCTION: &str = "You are a world-class PMP-certified project manager. \
Create a complete Project Charter for the project described below. \
Estimate a realistic budget and a timeline in weeks, and name 3-5 key objectives.";

fn charter_prompt(state: &ProjectState) -> String {
    let input = &state.project_input;
    let mut prompt = format!(
        "{CHARTER_INSTRUCTION}\n\nProject Title: {}\nProject Description: {}\nProject Type: {}",
        input.project_title, input.project_description, input.project_type
    );

    if let Some(stakeholders) = &input.key_stakeholders {
        prompt.push_str(&format!("\nKey Stakeholders: {}", stakeholders.join(", ")));
    }
    if let Some(objectives) = &input.project_objectives {
        prompt.push_str(&format!("\nStated Objectives: {}", objectives.join(", ")));
    }
    if let Some(duration) = &input.project_duration {
        prompt.push_str(&format!("\nExpected Duration: {duration}"));
    }
    if let Some(budget) = &input.budget_range {
        prompt.push_str(&format!("\nBudget Range: {budget}"));
    }
    if let Some(team_size) = &input.team_size {
        prompt.push_str(&format!("\nTeam Size: {team_size}"));
    }
    if let Some(constraints) = &input.constraints {
        prompt.push_str(&format!("\nConstraints: {constraints}"));
    }
    if let Some(assumptions) = &input.assumptions {
        prompt.push_str(&format!("\nAssumptions: {assumptions}"));
    }

    prompt
}

pub(crate) async fn generate_charter(
    generator: &dyn TextGenerator,
    mut state: ProjectState,
) -> Result<ProjectState> {
    tracing::info!(project_id = %state.project_id, "generating charter");

    let charter: Charter = generate_document(generator, &charter_prompt(&state)).await?;
    state.documents.charter = Some(charter);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_core::{PlanError, ProjectInput};
    use planforge_model::MockGenerator;
    use serde_json::json;

    fn state() -> ProjectState {
        let input = ProjectInput::new("CRM Rollout", "Replace the legacy CRM", "Software")
            .with_stakeholders(vec!["Sales".to_string(), "IT".to_string()]);
        ProjectState::new("p-1", input)
    }

    fn charter_json() -> serde_json::Value {
        json!({
            "project_title": "CRM Rollout",
            "project_description": "Replace the legacy CRM",
            "objectives": ["Migrate data", "Train staff"],
            "requirements": ["Zero downtime"],
            "stakeholders": ["Sales", "IT"],
            "budget": 150000.0,
            "timeline_weeks": 20
        })
    }

    #[tokio::test]
    async fn test_charter_written_to_documents() {
        let generator = MockGenerator::new("mock").with_structured(charter_json());

        let result = generate_charter(&generator, state()).await.unwrap();
        let charter = result.documents.charter.unwrap();
        assert_eq!(charter.stakeholders, vec!["Sales", "IT"]);
        assert_eq!(generator.structured_calls(), 1);
    }

    #[tokio::test]
    async fn test_charter_failure_is_fatal() {
        let generator = MockGenerator::new("mock").with_structured_error("model offline");

        let result = generate_charter(&generator, state()).await;
        assert!(matches!(result, Err(PlanError::Capability(_))));
    }

    #[test]
    fn test_prompt_includes_optional_fields() {
        let prompt = charter_prompt(&state());
        assert!(prompt.contains("Key Stakeholders: Sales, IT"));
        assert!(prompt.contains("Project Type: Software"));
    }
}
