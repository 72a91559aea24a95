pub mod controllers;

pub use controllers::ProjectsController;

use crate::ServerConfig;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.security.allowed_origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> =
            config.security.allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

/// Create the server application.
pub fn create_app(config: ServerConfig) -> Router {
    let projects_controller = ProjectsController::new(config.clone());

    let api_router = Router::new()
        .route("/health", get(health_check))
        .route("/projects", post(controllers::projects::create_project))
        .route(
            "/projects/{project_id}/status",
            get(controllers::projects::get_project_status),
        )
        .route(
            "/projects/{project_id}/download/{doc_type}",
            get(controllers::projects::download_document),
        )
        .with_state(projects_controller);

    Router::new().nest("/api", api_router).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                axum::http::StatusCode::REQUEST_TIMEOUT,
                config.security.request_timeout,
            ))
            .layer(build_cors_layer(&config)),
    )
}

async fn health_check() -> &'static str {
    "OK"
}
