//! Web search against the Tavily REST API.

use async_trait::async_trait;
use planforge_core::{PlanError, Result, WebSearch};
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, Clone)]
pub struct TavilyConfig {
    pub api_key: String,
    /// Override for tests; defaults to the public endpoint.
    pub base_url: Option<String>,
}

impl TavilyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: None }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    content: String,
}

/// Tavily search client. Best-effort by contract: callers treat failures as
/// advisory and fall back to their own defaults.
pub struct TavilySearch {
    client: reqwest::Client,
    config: TavilyConfig,
}

impl TavilySearch {
    pub fn new(config: TavilyConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    fn search_url(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/search", base.trim_end_matches('/'))
    }
}

#[async_trait]
impl WebSearch for TavilySearch {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let body = json!({
            "api_key": self.config.api_key,
            "query": query,
            "max_results": max_results,
        });

        let response = self
            .client
            .post(self.search_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| PlanError::Search(format!("tavily request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlanError::Search(format!("tavily returned HTTP {status}")));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| PlanError::Search(format!("tavily returned unreadable body: {e}")))?;

        Ok(payload
            .results
            .into_iter()
            .map(|r| r.content)
            .filter(|c| !c.is_empty())
            .take(max_results)
            .collect())
    }
}
