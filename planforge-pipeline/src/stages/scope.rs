//! Scope statement generation with a bounded retry on empty deliverables.
//!
//! The deliverables list drives the WBS loop, so a scope without any
//! deliverables is unusable. Generation or validation errors are fatal
//! immediately; only an empty deliverables list triggers a retry.

use super::generate_document;
use planforge_core::{PlanError, ProjectState, Result, Scope, TextGenerator};

const MAX_SCOPE_ATTEMPTS: usize = 3;

fn scope_prompt(state: &ProjectState) -> String {
    let input = &state.project_input;
    let charter_context = state
        .documents
        .charter
        .as_ref()
        .map(|c| format!("\nCharter Objectives: {}", c.objectives.join(", ")))
        .unwrap_or_default();

    format!(
        "You are a world-class PMP-certified project manager. \
Create a detailed Scope Statement for the project below. \
The deliverables list MUST contain at least 3 concrete, tangible deliverables.\n\n\
Project Title: {}\nProject Description: {}{charter_context}",
        input.project_title, input.project_description
    )
}

pub(crate) async fn generate_scope(
    generator: &dyn TextGenerator,
    mut state: ProjectState,
) -> Result<ProjectState> {
    let prompt = scope_prompt(&state);

    for attempt in 1..=MAX_SCOPE_ATTEMPTS {
        tracing::info!(project_id = %state.project_id, attempt, "generating scope statement");

        let scope: Scope = generate_document(generator, &prompt).await?;
        if !scope.deliverables.is_empty() {
            state.documents.scope = Some(scope);
            return Ok(state);
        }

        tracing::warn!(
            project_id = %state.project_id,
            attempt,
            "scope statement had no deliverables, retrying"
        );
    }

    Err(PlanError::Validation(
        "failed to generate a valid scope statement with deliverables".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_core::ProjectInput;
    use planforge_model::MockGenerator;
    use serde_json::json;

    fn state() -> ProjectState {
        let input = ProjectInput::new("CRM Rollout", "Replace the legacy CRM", "Software");
        ProjectState::new("p-1", input)
    }

    fn scope_json(deliverables: Vec<&str>) -> serde_json::Value {
        json!({
            "description": "Full CRM replacement",
            "deliverables": deliverables,
            "acceptance_criteria": ["All records migrated"],
            "exclusions": [],
            "constraints": [],
            "assumptions": []
        })
    }

    #[tokio::test]
    async fn test_scope_accepted_with_deliverables() {
        let generator =
            MockGenerator::new("mock").with_structured(scope_json(vec!["Data migration plan"]));

        let result = generate_scope(&generator, state()).await.unwrap();
        let scope = result.documents.scope.unwrap();
        assert_eq!(scope.deliverables, vec!["Data migration plan"]);
        assert_eq!(generator.structured_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_deliverables_retries_three_times_then_fails() {
        let generator = MockGenerator::new("mock")
            .with_structured(scope_json(vec![]))
            .with_structured(scope_json(vec![]))
            .with_structured(scope_json(vec![]));

        let result = generate_scope(&generator, state()).await;
        assert!(matches!(result, Err(PlanError::Validation(_))));
        assert_eq!(generator.structured_calls(), 3);
    }

    #[tokio::test]
    async fn test_retry_succeeds_on_third_attempt() {
        let generator = MockGenerator::new("mock")
            .with_structured(scope_json(vec![]))
            .with_structured(scope_json(vec![]))
            .with_structured(scope_json(vec!["Training materials"]));

        let result = generate_scope(&generator, state()).await.unwrap();
        let scope = result.documents.scope.unwrap();
        assert_eq!(scope.deliverables, vec!["Training materials"]);
        assert_eq!(generator.structured_calls(), 3);
    }

    #[tokio::test]
    async fn test_generation_error_is_fatal_without_retry() {
        let generator = MockGenerator::new("mock").with_structured_error("model offline");

        let result = generate_scope(&generator, state()).await;
        assert!(matches!(result, Err(PlanError::Capability(_))));
        assert_eq!(generator.structured_calls(), 1);
    }
}
