//! WBS sub-workflow: a loop that decomposes each scope deliverable into a
//! small task tree, then compiles the accumulated trees into the final WBS.
//!
//! The loop is driven by a conditional router: while deliverables remain it
//! routes back through `prepare_next_deliverable` and `wbs_agent`; once the
//! queue is empty it routes to `compile_wbs`.

use super::generate_document;
use planforge_core::{PlanError, ProjectState, Result, TextGenerator, Wbs};

pub(crate) const ROUTE_CONTINUE: &str = "continue_loop";
pub(crate) const ROUTE_END: &str = "end_loop";

/// Seed the deliverable queue from the scope statement.
pub(crate) fn setup_wbs_loop(mut state: ProjectState) -> Result<ProjectState> {
    let deliverables = state
        .documents
        .scope
        .as_ref()
        .map(|s| s.deliverables.clone())
        .unwrap_or_default();

    if deliverables.is_empty() {
        return Err(PlanError::Validation(
            "cannot build a WBS without scope deliverables".to_string(),
        ));
    }

    tracing::info!(
        project_id = %state.project_id,
        count = deliverables.len(),
        "starting WBS loop"
    );
    state.deliverables_to_process = deliverables;
    state.wbs_accumulator.clear();
    state.current_deliverable = None;
    Ok(state)
}

/// Pop the next deliverable off the front of the queue.
pub(crate) fn prepare_next_deliverable(mut state: ProjectState) -> Result<ProjectState> {
    if state.deliverables_to_process.is_empty() {
        return Err(PlanError::Pipeline(
            "deliverable queue drained unexpectedly".to_string(),
        ));
    }
    let next = state.deliverables_to_process.remove(0);
    tracing::debug!(project_id = %state.project_id, deliverable = %next, "next deliverable");
    state.current_deliverable = Some(next);
    Ok(state)
}

/// Decompose the current deliverable into 2-4 main tasks with sub-tasks.
pub(crate) async fn wbs_agent(
    generator: &dyn TextGenerator,
    mut state: ProjectState,
) -> Result<ProjectState> {
    let deliverable = state.current_deliverable.clone().ok_or_else(|| {
        PlanError::Pipeline("wbs agent invoked without a current deliverable".to_string())
    })?;

    let prompt = format!(
        "You are a world-class PMP-certified project manager. \
Break down the deliverable below into 2-4 main tasks, each with concrete sub-tasks. \
Task names must be short action phrases.\n\n\
Project Title: {}\nDeliverable: {deliverable}",
        state.project_input.project_title
    );

    let wbs: Wbs = generate_document(generator, &prompt).await?;
    state.wbs_accumulator.extend(wbs.wbs_items);
    Ok(state)
}

/// Assemble the accumulated task trees into the final WBS document.
pub(crate) fn compile_wbs(mut state: ProjectState) -> Result<ProjectState> {
    tracing::info!(
        project_id = %state.project_id,
        root_tasks = state.wbs_accumulator.len(),
        "compiling WBS"
    );
    state.documents.wbs = Some(Wbs {
        wbs_items: state.wbs_accumulator.clone(),
    });
    Ok(state)
}

/// Router for the loop: keep going while deliverables remain.
pub(crate) fn continue_wbs_loop(state: &ProjectState) -> String {
    if state.deliverables_to_process.is_empty() {
        ROUTE_END.to_string()
    } else {
        ROUTE_CONTINUE.to_string()
    }
}
