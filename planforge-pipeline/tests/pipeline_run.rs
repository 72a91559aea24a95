//! End-to-end pipeline runs against scripted capabilities.

use std::sync::Arc;

use planforge_core::{PlanError, ProjectInput, ProjectState};
use planforge_model::{MockGenerator, MockSearch};
use planforge_pipeline::Pipeline;
use serde_json::json;

fn input() -> ProjectInput {
    ProjectInput::new(
        "Website Redesign",
        "Redesign the corporate website with a new CMS",
        "Software",
    )
    .with_stakeholders(vec!["Marketing".to_string(), "IT".to_string()])
}

fn charter_reply() -> serde_json::Value {
    json!({
        "project_title": "Website Redesign",
        "project_description": "Redesign the corporate website with a new CMS",
        "objectives": ["Modernize the brand", "Improve conversion"],
        "requirements": ["WCAG AA compliance"],
        "stakeholders": ["Marketing", "IT"],
        "budget": 80000.0,
        "timeline_weeks": 12
    })
}

fn scope_reply(deliverables: Vec<&str>) -> serde_json::Value {
    json!({
        "description": "Full site rebuild on the new CMS",
        "deliverables": deliverables,
        "acceptance_criteria": ["Stakeholder sign-off"],
        "exclusions": ["Print collateral"],
        "constraints": [],
        "assumptions": []
    })
}

fn wbs_reply(root: &str) -> serde_json::Value {
    json!({
        "wbs_items": [{
            "task_name": root,
            "sub_tasks": [
                {"task_name": format!("{root} draft"), "sub_tasks": []},
                {"task_name": format!("{root} review"), "sub_tasks": []}
            ]
        }]
    })
}

fn durations_reply() -> serde_json::Value {
    json!({
        "durations": [
            {"task_name": "Design system", "estimated_duration_days": 5},
            {"task_name": "CMS setup", "estimated_duration_days": 4}
        ]
    })
}

fn stakeholder_reply() -> serde_json::Value {
    json!({
        "stakeholders": [{
            "name": "Marketing",
            "role": "Content owner",
            "interest": "High",
            "influence": "High",
            "engagement_strategy": "Manage Closely"
        }]
    })
}

fn communication_reply() -> serde_json::Value {
    json!({
        "communications": [{
            "stakeholder": "Marketing",
            "information": "Project status update",
            "method": "Weekly Meeting",
            "frequency": "Weekly",
            "owner": "Project Manager"
        }]
    })
}

fn risk_text() -> String {
    "RISK 1:\nDescription: CMS vendor may slip the release.\nProbability: Medium\n\
Impact: High\nResponse Strategy: Mitigate: pin a tested version.\nOwner: Technical Lead"
        .to_string()
}

#[tokio::test]
async fn test_full_run_produces_all_documents() {
    let generator = Arc::new(
        MockGenerator::new("mock")
            .with_structured(charter_reply())
            .with_structured(scope_reply(vec!["Design system", "CMS setup"]))
            .with_structured(wbs_reply("Design system"))
            .with_structured(wbs_reply("CMS setup"))
            .with_structured(durations_reply())
            .with_structured(stakeholder_reply())
            .with_structured(communication_reply())
            .with_text(risk_text()),
    );
    let search = Arc::new(MockSearch::new().with_snippets(["CMS projects often slip."]));

    let pipeline = Pipeline::new(generator.clone(), search.clone()).unwrap();
    let state = ProjectState::new("proj-1", input());
    let done = pipeline.run(state).await.unwrap();

    assert!(done.documents.charter.is_some());
    assert!(done.documents.scope.is_some());
    assert!(done.documents.risk_register.is_some());
    assert!(done.documents.schedule.is_some());
    assert!(done.documents.stakeholder_analysis.is_some());
    assert!(done.documents.communication_plan.is_some());

    // One WBS root tree per deliverable, compiled in order.
    let wbs = done.documents.wbs.as_ref().unwrap();
    assert_eq!(wbs.wbs_items.len(), 2);
    assert_eq!(wbs.wbs_items[0].task_name, "Design system");
    assert_eq!(wbs.wbs_items[1].task_name, "CMS setup");

    // Six tasks back to back: two 5/4-day roots and four 3-day defaults.
    let schedule = done.documents.schedule.as_ref().unwrap();
    assert_eq!(schedule.tasks.len(), 6);
    assert_eq!(schedule.tasks[0].id, "1");
    assert_eq!(schedule.tasks[1].id, "1.1");
    assert_eq!(schedule.tasks[3].id, "2");
    assert_eq!(schedule.tasks[0].duration_days, 5);
    assert_eq!(schedule.tasks[1].duration_days, 3);

    let register = done.documents.risk_register.as_ref().unwrap();
    assert_eq!(register.risks[0].owner, "Technical Lead");

    // charter + scope + 2 wbs + durations + stakeholders + communications
    assert_eq!(generator.structured_calls(), 7);
    assert_eq!(generator.text_calls(), 1);
    assert_eq!(search.calls(), 1);
}

#[tokio::test]
async fn test_wbs_loop_runs_once_per_deliverable() {
    for n in [1usize, 3, 7] {
        let deliverables: Vec<String> = (0..n).map(|i| format!("Deliverable {i}")).collect();
        let mut generator = MockGenerator::new("mock")
            .with_structured(charter_reply())
            .with_structured(scope_reply(deliverables.iter().map(String::as_str).collect()));
        for d in &deliverables {
            generator = generator.with_structured(wbs_reply(d));
        }
        let generator = Arc::new(
            generator
                .with_structured(durations_reply())
                .with_structured(stakeholder_reply())
                .with_structured(communication_reply())
                .with_text(risk_text()),
        );
        let search = Arc::new(MockSearch::new().with_snippets(["snippet"]));

        let pipeline = Pipeline::new(generator.clone(), search).unwrap();
        let done = pipeline
            .run(ProjectState::new(format!("proj-n{n}"), input()))
            .await
            .unwrap();

        let wbs = done.documents.wbs.as_ref().unwrap();
        assert_eq!(wbs.wbs_items.len(), n);
        assert!(done.deliverables_to_process.is_empty());
        // charter + scope + one call per deliverable + durations +
        // stakeholders + communications
        assert_eq!(generator.structured_calls(), n + 6);
    }
}

#[tokio::test]
async fn test_charter_failure_aborts_the_run() {
    let generator = Arc::new(MockGenerator::new("mock").with_structured_error("model offline"));
    let search = Arc::new(MockSearch::new());

    let pipeline = Pipeline::new(generator.clone(), search).unwrap();
    let state = ProjectState::new("proj-2", input());
    let result = pipeline.run(state).await;

    let err = result.unwrap_err();
    assert!(matches!(err, PlanError::Pipeline(_)));
    assert!(err.to_string().contains("generate_charter"));
    assert_eq!(generator.structured_calls(), 1);
}

#[tokio::test]
async fn test_scope_retry_is_bounded() {
    let generator = Arc::new(
        MockGenerator::new("mock")
            .with_structured(charter_reply())
            .with_structured(scope_reply(vec![]))
            .with_structured(scope_reply(vec![]))
            .with_structured(scope_reply(vec![])),
    );
    let search = Arc::new(MockSearch::new());

    let pipeline = Pipeline::new(generator.clone(), search).unwrap();
    let state = ProjectState::new("proj-3", input());
    let result = pipeline.run(state).await;

    assert!(result.is_err());
    // charter + exactly three scope attempts
    assert_eq!(generator.structured_calls(), 4);
}

#[tokio::test]
async fn test_blank_input_rejected_before_any_generation() {
    let generator = Arc::new(MockGenerator::new("mock"));
    let search = Arc::new(MockSearch::new());

    let pipeline = Pipeline::new(generator.clone(), search).unwrap();
    let state = ProjectState::new("proj-4", ProjectInput::new("  ", "desc", "Software"));
    let result = pipeline.run(state).await;

    assert!(matches!(result, Err(PlanError::Validation(_))));
    assert_eq!(generator.structured_calls(), 0);
}

#[tokio::test]
async fn test_risk_and_schedule_fallbacks_keep_the_run_alive() {
    // Risk text generation and duration estimation both fail; the pipeline
    // still completes with the canned register and default durations.
    let generator = Arc::new(
        MockGenerator::new("mock")
            .with_structured(charter_reply())
            .with_structured(scope_reply(vec!["Design system"]))
            .with_structured(wbs_reply("Design system"))
            .with_structured_error("durations offline")
            .with_structured(stakeholder_reply())
            .with_structured(communication_reply())
            .with_text_error("risk model offline"),
    );
    let search = Arc::new(MockSearch::new().failing("search down"));

    let pipeline = Pipeline::new(generator, search).unwrap();
    let state = ProjectState::new("proj-5", input());
    let done = pipeline.run(state).await.unwrap();

    let register = done.documents.risk_register.as_ref().unwrap();
    assert_eq!(register.risks.len(), 2);

    let schedule = done.documents.schedule.as_ref().unwrap();
    assert!(schedule.tasks.iter().all(|t| t.duration_days == 3));
}
