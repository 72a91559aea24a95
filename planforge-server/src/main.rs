use std::sync::Arc;

use planforge_core::{PlanError, Result};
use planforge_model::{OpenAICompatibleConfig, OpenAICompatibleGenerator, TavilyConfig, TavilySearch};
use planforge_pipeline::Pipeline;
use planforge_server::{create_app, InMemoryProjectStore, ServerConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,planforge_server=debug")),
        )
        .init();

    let api_key = std::env::var("PLANFORGE_API_KEY")
        .map_err(|_| PlanError::Config("PLANFORGE_API_KEY is not set".to_string()))?;
    let model = std::env::var("PLANFORGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

    let mut generator_config = OpenAICompatibleConfig::new(api_key, model);
    if let Ok(base_url) = std::env::var("PLANFORGE_BASE_URL") {
        generator_config = generator_config.with_base_url(base_url);
    }
    let generator = Arc::new(OpenAICompatibleGenerator::new(generator_config));

    let tavily_key = std::env::var("TAVILY_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("TAVILY_API_KEY is not set, risk research will fall back");
        String::new()
    });
    let search = Arc::new(TavilySearch::new(TavilyConfig::new(tavily_key)));

    let pipeline = Arc::new(Pipeline::new(generator, search)?);
    let store = Arc::new(InMemoryProjectStore::new());
    let app = create_app(ServerConfig::new(pipeline, store));

    let addr = std::env::var("PLANFORGE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "planforge server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
