//! Project lifecycle handlers: submit, poll, download.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use planforge_core::{DocumentKind, ProjectInput, ProjectState};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::render;
use crate::store::{ProjectRecord, ProjectStatus};
use crate::ServerConfig;

#[derive(Clone)]
pub struct ProjectsController {
    config: ServerConfig,
}

impl ProjectsController {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

#[derive(Serialize, Deserialize)]
pub struct CreateProjectResponse {
    pub project_id: String,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct StatusResponse {
    pub project_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (status, Json(json!({ "detail": detail.into() })))
}

fn store_error(e: planforge_core::PlanError) -> ApiError {
    tracing::error!(error = %e, "project store failure");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "project store unavailable")
}

/// Run the pipeline for an accepted project and persist the terminal
/// outcome. Runs detached from the submitting request.
async fn run_project_pipeline(config: ServerConfig, state: ProjectState) {
    let project_id = state.project_id.clone();
    tracing::info!(project_id = %project_id, "background pipeline started");

    let record = match config.pipeline.run(state.clone()).await {
        Ok(final_state) => {
            tracing::info!(project_id = %project_id, "background pipeline finished");
            ProjectRecord::complete(final_state)
        }
        Err(e) => {
            tracing::error!(project_id = %project_id, error = %e, "background pipeline failed");
            ProjectRecord::failed(state, e.to_string())
        }
    };

    if let Err(e) = config.store.put(record).await {
        tracing::error!(project_id = %project_id, error = %e, "failed to persist terminal status");
    }
}

pub async fn create_project(
    State(controller): State<ProjectsController>,
    Json(input): Json<ProjectInput>,
) -> Result<(StatusCode, Json<CreateProjectResponse>), ApiError> {
    input
        .validate()
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let project_id = Uuid::new_v4().to_string();
    let state = ProjectState::new(project_id.clone(), input);

    let config = controller.config.clone();
    config
        .store
        .put(ProjectRecord::pending(state.clone()))
        .await
        .map_err(store_error)?;

    tokio::spawn(run_project_pipeline(config, state));

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateProjectResponse {
            project_id,
            message: "Project generation has been started.".to_string(),
        }),
    ))
}

pub async fn get_project_status(
    State(controller): State<ProjectsController>,
    Path(project_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let record = controller
        .config
        .store
        .get(&project_id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Project not found"))?;

    Ok(Json(StatusResponse {
        project_id,
        status: record.status.as_str().to_string(),
        error: record.error_message,
    }))
}

pub async fn download_document(
    State(controller): State<ProjectsController>,
    Path((project_id, doc_type)): Path<(String, String)>,
) -> Result<(HeaderMap, String), ApiError> {
    let kind = DocumentKind::parse(&doc_type).ok_or_else(|| {
        error_response(StatusCode::NOT_FOUND, format!("Unknown document type '{doc_type}'."))
    })?;

    let record = controller
        .config
        .store
        .get(&project_id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Project not found."))?;

    if record.status != ProjectStatus::Complete {
        return Err(error_response(
            StatusCode::CONFLICT,
            format!(
                "Project generation is not complete. Current status: {}",
                record.status.as_str()
            ),
        ));
    }

    let project_name = &record.state.project_input.project_title;
    let markdown = render::render(kind, project_name, &record.state.documents).ok_or_else(|| {
        error_response(
            StatusCode::NOT_FOUND,
            format!("Document '{}' not found for this project.", kind.as_str()),
        )
    })?;

    let filename = format!("{project_id}_{}.md", kind.as_str());
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/markdown; charset=utf-8"),
    );
    let disposition = format!("attachment; filename={filename}");
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|_| {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "invalid attachment filename")
        })?,
    );

    Ok((headers, markdown))
}
