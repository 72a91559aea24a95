//! Schedule generation: flatten the WBS into dotted task IDs, estimate
//! per-task durations, and lay the tasks out back to back from today.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use planforge_core::{
    DurationEstimation, GanttTask, ProjectState, Result, Schedule, TextGenerator, WbsItem,
};

use super::generate_document;

const DEFAULT_DURATION_DAYS: i64 = 3;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A WBS task with its hierarchical dotted ID, in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTask {
    pub id: String,
    pub name: String,
}

/// Depth-first pre-order flattening. Siblings are numbered from 1 and
/// children extend the parent ID with a dot, so the second child of the
/// first root task gets `"1.2"`.
pub fn flatten_wbs(items: &[WbsItem], prefix: &str) -> Vec<FlatTask> {
    let mut tasks = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let task_id = format!("{prefix}{}", i + 1);
        tasks.push(FlatTask {
            id: task_id.clone(),
            name: item.task_name.clone(),
        });
        tasks.extend(flatten_wbs(&item.sub_tasks, &format!("{task_id}.")));
    }
    tasks
}

/// Lay tasks out sequentially with no gaps. A task of duration N occupies
/// N calendar days, so its end date is start + N - 1 and the next task
/// starts the day after. Durations below 1 are clamped to 1.
pub fn build_schedule(
    tasks: &[FlatTask],
    durations: &HashMap<String, i64>,
    start: NaiveDate,
) -> Schedule {
    let mut gantt = Vec::with_capacity(tasks.len());
    let mut cursor = start;

    for task in tasks {
        let duration = durations
            .get(&task.name)
            .copied()
            .unwrap_or(DEFAULT_DURATION_DAYS)
            .max(1);
        let end = cursor + Duration::days(duration - 1);
        gantt.push(GanttTask {
            id: task.id.clone(),
            name: task.name.clone(),
            start: cursor.format(DATE_FORMAT).to_string(),
            end: end.format(DATE_FORMAT).to_string(),
            duration_days: duration,
        });
        cursor = end + Duration::days(1);
    }

    let project_end = if gantt.is_empty() {
        start
    } else {
        cursor - Duration::days(1)
    };

    Schedule {
        tasks: gantt,
        project_start_date: start.format(DATE_FORMAT).to_string(),
        project_end_date: project_end.format(DATE_FORMAT).to_string(),
    }
}

async fn estimate_durations(
    generator: &dyn TextGenerator,
    project_title: &str,
    tasks: &[FlatTask],
) -> HashMap<String, i64> {
    let task_list = tasks
        .iter()
        .map(|t| format!("- {}", t.name))
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = format!(
        "You are a world-class PMP-certified project scheduler. \
Estimate a working-day duration for every task below. \
Return one entry per task, using the exact task name given.\n\n\
Project Title: {project_title}\nTasks:\n{task_list}"
    );

    match generate_document::<DurationEstimation>(generator, &prompt).await {
        Ok(estimation) => estimation
            .durations
            .into_iter()
            .map(|d| (d.task_name, d.estimated_duration_days))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "duration estimation failed, defaulting all tasks");
            HashMap::new()
        }
    }
}

pub(crate) async fn generate_schedule(
    generator: &dyn TextGenerator,
    mut state: ProjectState,
) -> Result<ProjectState> {
    let wbs_items = state
        .documents
        .wbs
        .as_ref()
        .map(|w| w.wbs_items.clone())
        .unwrap_or_default();

    if wbs_items.is_empty() {
        tracing::warn!(project_id = %state.project_id, "no WBS tasks, skipping schedule");
        return Ok(state);
    }

    let tasks = flatten_wbs(&wbs_items, "");
    tracing::info!(project_id = %state.project_id, tasks = tasks.len(), "generating schedule");

    let durations =
        estimate_durations(generator, &state.project_input.project_title, &tasks).await;
    let start = chrono::Local::now().date_naive();
    state.documents.schedule = Some(build_schedule(&tasks, &durations, start));
    Ok(state)
}
