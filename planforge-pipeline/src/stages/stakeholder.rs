//! Stakeholder analysis. Short-circuits to an empty analysis when the
//! charter named no stakeholders, rather than asking the model to invent them.

use super::generate_document;
use planforge_core::{ProjectState, Result, StakeholderAnalysis, TextGenerator};

pub(crate) async fn generate_stakeholder_analysis(
    generator: &dyn TextGenerator,
    mut state: ProjectState,
) -> Result<ProjectState> {
    let names = state
        .documents
        .charter
        .as_ref()
        .map(|c| c.stakeholders.clone())
        .unwrap_or_default();

    if names.is_empty() {
        tracing::warn!(
            project_id = %state.project_id,
            "charter names no stakeholders, recording an empty analysis"
        );
        state.documents.stakeholder_analysis = Some(StakeholderAnalysis::default());
        return Ok(state);
    }

    let listing = names
        .iter()
        .map(|n| format!("- {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = format!(
        "You are a world-class PMP-certified project manager. \
Analyze each stakeholder below: their role, interest level, influence level \
and an engagement strategy.\n\n\
Project Title: {}\nStakeholders:\n{listing}",
        state.project_input.project_title
    );

    let analysis: StakeholderAnalysis = generate_document(generator, &prompt).await?;
    state.documents.stakeholder_analysis = Some(analysis);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_core::{Charter, PlanError, ProjectInput};
    use planforge_model::MockGenerator;
    use serde_json::json;

    fn state_with_charter(stakeholders: Vec<&str>) -> ProjectState {
        let input = ProjectInput::new("CRM Rollout", "Replace the legacy CRM", "Software");
        let mut state = ProjectState::new("p-1", input);
        state.documents.charter = Some(Charter {
            project_title: "CRM Rollout".to_string(),
            project_description: "Replace the legacy CRM".to_string(),
            stakeholders: stakeholders.into_iter().map(String::from).collect(),
            ..Charter::default()
        });
        state
    }

    #[tokio::test]
    async fn test_no_stakeholders_skips_generation() {
        let generator = MockGenerator::new("mock");
        let state = state_with_charter(vec![]);

        let result = generate_stakeholder_analysis(&generator, state)
            .await
            .unwrap();
        let analysis = result.documents.stakeholder_analysis.unwrap();
        assert!(analysis.stakeholders.is_empty());
        assert_eq!(generator.structured_calls(), 0);
    }

    #[tokio::test]
    async fn test_analysis_generated_for_named_stakeholders() {
        let generator = MockGenerator::new("mock").with_structured(json!({
            "stakeholders": [{
                "name": "Sales",
                "role": "Primary users",
                "interest": "High",
                "influence": "Medium",
                "engagement_strategy": "Weekly demos"
            }]
        }));
        let state = state_with_charter(vec!["Sales"]);

        let result = generate_stakeholder_analysis(&generator, state)
            .await
            .unwrap();
        let analysis = result.documents.stakeholder_analysis.unwrap();
        assert_eq!(analysis.stakeholders.len(), 1);
        assert_eq!(analysis.stakeholders[0].name, "Sales");
    }

    #[tokio::test]
    async fn test_generation_failure_is_fatal() {
        let generator = MockGenerator::new("mock").with_structured_error("model offline");
        let state = state_with_charter(vec!["Sales"]);

        let result = generate_stakeholder_analysis(&generator, state).await;
        assert!(matches!(result, Err(PlanError::Capability(_))));
    }
}
