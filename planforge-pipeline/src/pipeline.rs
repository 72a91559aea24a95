//! Pipeline assembly: wires the document stages into a compiled graph.
//!
//! The shape mirrors the planning workflow: charter and scope run first,
//! then a loop decomposes each deliverable into WBS tasks, and the
//! remaining documents build on the compiled WBS.

use std::sync::Arc;

use planforge_core::{PlanError, ProjectState, TextGenerator, WebSearch};
use planforge_graph::{CompiledGraph, ExecutionConfig, StateGraph, END, START};

use crate::stages::wbs::{ROUTE_CONTINUE, ROUTE_END};
use crate::stages::{charter, communication, risk, schedule, scope, stakeholder, wbs};

/// Step budget for a run. The WBS loop contributes three steps per
/// deliverable, so this comfortably covers any realistic scope.
const RECURSION_LIMIT: usize = 1000;

/// The document generation pipeline.
///
/// Construction compiles the stage graph once; [`Pipeline::run`] can then
/// be called for any number of projects.
pub struct Pipeline {
    graph: CompiledGraph<ProjectState>,
}

impl Pipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        search: Arc<dyn WebSearch>,
    ) -> planforge_core::Result<Self> {
        let charter_gen = generator.clone();
        let scope_gen = generator.clone();
        let wbs_gen = generator.clone();
        let risk_gen = generator.clone();
        let schedule_gen = generator.clone();
        let stakeholder_gen = generator.clone();
        let communication_gen = generator.clone();

        let graph = StateGraph::new()
            .add_node_fn("generate_charter", move |state, _ctx| {
                let generator = charter_gen.clone();
                async move {
                    Ok(charter::generate_charter(generator.as_ref(), state).await?)
                }
            })
            .add_node_fn("generate_scope", move |state, _ctx| {
                let generator = scope_gen.clone();
                async move { Ok(scope::generate_scope(generator.as_ref(), state).await?) }
            })
            .add_node_fn("setup_wbs_loop", |state, _ctx| async move {
                Ok(wbs::setup_wbs_loop(state)?)
            })
            .add_node_fn("prepare_next_deliverable", |state, _ctx| async move {
                Ok(wbs::prepare_next_deliverable(state)?)
            })
            .add_node_fn("wbs_agent", move |state, _ctx| {
                let generator = wbs_gen.clone();
                async move { Ok(wbs::wbs_agent(generator.as_ref(), state).await?) }
            })
            .add_node_fn("compile_wbs", |state, _ctx| async move {
                Ok(wbs::compile_wbs(state)?)
            })
            .add_node_fn("generate_risk_register", move |state, _ctx| {
                let generator = risk_gen.clone();
                let search = search.clone();
                async move {
                    Ok(risk::generate_risk_register(
                        generator.as_ref(),
                        search.as_ref(),
                        state,
                    )
                    .await?)
                }
            })
            .add_node_fn("generate_schedule", move |state, _ctx| {
                let generator = schedule_gen.clone();
                async move { Ok(schedule::generate_schedule(generator.as_ref(), state).await?) }
            })
            .add_node_fn("stakeholder_analysis", move |state, _ctx| {
                let generator = stakeholder_gen.clone();
                async move {
                    Ok(
                        stakeholder::generate_stakeholder_analysis(generator.as_ref(), state)
                            .await?,
                    )
                }
            })
            .add_node_fn("communication_plan", move |state, _ctx| {
                let generator = communication_gen.clone();
                async move {
                    Ok(
                        communication::generate_communication_plan(generator.as_ref(), state)
                            .await?,
                    )
                }
            })
            .add_edge(START, "generate_charter")
            .add_edge("generate_charter", "generate_scope")
            .add_edge("generate_scope", "setup_wbs_loop")
            .add_conditional_edges(
                "setup_wbs_loop",
                wbs::continue_wbs_loop,
                [
                    (ROUTE_CONTINUE, "prepare_next_deliverable"),
                    (ROUTE_END, "compile_wbs"),
                ],
            )
            .add_edge("prepare_next_deliverable", "wbs_agent")
            .add_conditional_edges(
                "wbs_agent",
                wbs::continue_wbs_loop,
                [
                    (ROUTE_CONTINUE, "prepare_next_deliverable"),
                    (ROUTE_END, "compile_wbs"),
                ],
            )
            .add_edge("compile_wbs", "generate_risk_register")
            .add_edge("generate_risk_register", "generate_schedule")
            .add_edge("generate_schedule", "stakeholder_analysis")
            .add_edge("stakeholder_analysis", "communication_plan")
            .add_edge("communication_plan", END)
            .compile()
            .map_err(|e| PlanError::Pipeline(format!("failed to build pipeline graph: {e}")))?;

        Ok(Self { graph })
    }

    /// Run the full pipeline for one project, returning the final state
    /// with all generated documents.
    pub async fn run(&self, state: ProjectState) -> planforge_core::Result<ProjectState> {
        state.project_input.validate()?;

        let config =
            ExecutionConfig::new(&state.project_id).with_recursion_limit(RECURSION_LIMIT);
        tracing::info!(project_id = %state.project_id, "pipeline started");

        let result = self
            .graph
            .invoke(state, config)
            .await
            .map_err(|e| PlanError::Pipeline(e.to_string()))?;

        tracing::info!(
            project_id = %result.project_id,
            documents = result.documents.kinds().len(),
            "pipeline finished"
        );
        Ok(result)
    }
}
