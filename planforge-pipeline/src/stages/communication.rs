//! Communication plan, derived from the stakeholder analysis. With no
//! analyzed stakeholders there is nobody to plan communication for, so the
//! stage records an empty plan without calling the model.

use super::generate_document;
use planforge_core::{CommunicationPlan, PlanError, ProjectState, Result, TextGenerator};

pub(crate) async fn generate_communication_plan(
    generator: &dyn TextGenerator,
    mut state: ProjectState,
) -> Result<ProjectState> {
    let stakeholders = state
        .documents
        .stakeholder_analysis
        .as_ref()
        .map(|a| a.stakeholders.clone())
        .unwrap_or_default();

    if stakeholders.is_empty() {
        tracing::warn!(
            project_id = %state.project_id,
            "no analyzed stakeholders, recording an empty communication plan"
        );
        state.documents.communication_plan = Some(CommunicationPlan::default());
        return Ok(state);
    }

    let analysis = serde_json::to_string_pretty(&stakeholders)
        .map_err(|e| PlanError::Pipeline(format!("failed to render stakeholder analysis: {e}")))?;
    let prompt = format!(
        "You are a world-class PMP-certified project manager. \
Create a communication plan with one entry per stakeholder below, \
matching method and frequency to their influence and engagement strategy.\n\n\
Project Title: {}\nStakeholder Analysis:\n{analysis}",
        state.project_input.project_title
    );

    let plan: CommunicationPlan = generate_document(generator, &prompt).await?;
    state.documents.communication_plan = Some(plan);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_core::{ProjectInput, StakeholderAnalysis, StakeholderItem};
    use planforge_model::MockGenerator;
    use serde_json::json;

    fn state_with_analysis(stakeholders: Vec<StakeholderItem>) -> ProjectState {
        let input = ProjectInput::new("CRM Rollout", "Replace the legacy CRM", "Software");
        let mut state = ProjectState::new("p-1", input);
        state.documents.stakeholder_analysis = Some(StakeholderAnalysis { stakeholders });
        state
    }

    fn sales_stakeholder() -> StakeholderItem {
        StakeholderItem {
            name: "Sales".to_string(),
            role: "Primary users".to_string(),
            interest: "High".to_string(),
            influence: "Medium".to_string(),
            engagement_strategy: "Weekly demos".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_analysis_yields_empty_plan_without_generation() {
        let generator = MockGenerator::new("mock");
        let state = state_with_analysis(vec![]);

        let result = generate_communication_plan(&generator, state)
            .await
            .unwrap();
        let plan = result.documents.communication_plan.unwrap();
        assert!(plan.communications.is_empty());
        assert_eq!(generator.structured_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_analysis_also_short_circuits() {
        let generator = MockGenerator::new("mock");
        let input = ProjectInput::new("CRM Rollout", "Replace the legacy CRM", "Software");
        let state = ProjectState::new("p-1", input);

        let result = generate_communication_plan(&generator, state)
            .await
            .unwrap();
        assert!(result.documents.communication_plan.is_some());
        assert_eq!(generator.structured_calls(), 0);
    }

    #[tokio::test]
    async fn test_plan_generated_from_analysis() {
        let generator = MockGenerator::new("mock").with_structured(json!({
            "communications": [{
                "stakeholder": "Sales",
                "information": "Project status update",
                "method": "Email",
                "frequency": "Weekly",
                "owner": "Project Manager"
            }]
        }));
        let state = state_with_analysis(vec![sales_stakeholder()]);

        let result = generate_communication_plan(&generator, state)
            .await
            .unwrap();
        let plan = result.documents.communication_plan.unwrap();
        assert_eq!(plan.communications.len(), 1);
        assert_eq!(plan.communications[0].method, "Email");
    }

    #[tokio::test]
    async fn test_generation_failure_is_fatal() {
        let generator = MockGenerator::new("mock").with_structured_error("model offline");
        let state = state_with_analysis(vec![sales_stakeholder()]);

        let result = generate_communication_plan(&generator, state).await;
        assert!(matches!(result, Err(PlanError::Capability(_))));
    }
}
