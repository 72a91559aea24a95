//! Text generation against OpenAI-compatible chat-completions providers.

use crate::retry::{execute_with_retry, is_retryable_capability_error, RetryConfig};
use async_trait::async_trait;
use planforge_core::{PlanError, Result, TextGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for OpenAI-compatible providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAICompatibleConfig {
    /// Provider display name used in error messages.
    pub provider_name: String,
    /// API key.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Optional API base URL (defaults to the OpenAI endpoint).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl OpenAICompatibleConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider_name: "openai-compatible".to_string(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            temperature: None,
        }
    }

    /// Set provider display name used in errors.
    pub fn with_provider_name(mut self, provider_name: impl Into<String>) -> Self {
        self.provider_name = provider_name.into();
        self
    }

    /// Set a custom API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Chat-completions client for any OpenAI-compatible provider.
pub struct OpenAICompatibleGenerator {
    client: reqwest::Client,
    config: OpenAICompatibleConfig,
    retry_config: RetryConfig,
}

impl OpenAICompatibleGenerator {
    pub fn new(config: OpenAICompatibleConfig) -> Self {
        Self { client: reqwest::Client::new(), config, retry_config: RetryConfig::default() }
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    fn completions_url(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }

    async fn chat(&self, prompt: &str, response_format: Option<Value>) -> Result<String> {
        let mut body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        if let Some(temperature) = self.config.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(format) = response_format {
            body["response_format"] = format;
        }

        let url = self.completions_url();
        execute_with_retry(&self.retry_config, is_retryable_capability_error, || {
            let body = body.clone();
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .post(&url)
                    .bearer_auth(&self.config.api_key)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| {
                        PlanError::Capability(format!(
                            "{} request failed: {e}",
                            self.config.provider_name
                        ))
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let detail = response.text().await.unwrap_or_default();
                    return Err(PlanError::Capability(format!(
                        "{} returned HTTP {status}: {detail}",
                        self.config.provider_name
                    )));
                }

                let payload: Value = response.json().await.map_err(|e| {
                    PlanError::Capability(format!(
                        "{} returned unreadable body: {e}",
                        self.config.provider_name
                    ))
                })?;

                payload["choices"][0]["message"]["content"]
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        PlanError::Capability(format!(
                            "{} reply had no message content",
                            self.config.provider_name
                        ))
                    })
            }
        })
        .await
    }
}

/// Strip a surrounding markdown code fence, if present, and fall back to the
/// outermost brace pair. Models frequently fence JSON replies even when told
/// not to.
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the info string ("json") and the closing fence.
        let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
        if let Some(body) = body.rsplit_once("```").map(|(b, _)| b) {
            return body.trim();
        }
        return body.trim();
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(open), Some(close)) if close > open => &trimmed[open..=close],
        _ => trimmed,
    }
}

#[async_trait]
impl TextGenerator for OpenAICompatibleGenerator {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<Value> {
        let format = json!({
            "type": "json_schema",
            "json_schema": { "name": "document", "schema": schema, "strict": true }
        });

        let content = self.chat(prompt, Some(format)).await?;
        serde_json::from_str(extract_json(&content)).map_err(|e| {
            PlanError::Capability(format!(
                "{} returned non-conforming JSON: {e}",
                self.config.provider_name
            ))
        })
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.chat(prompt, None).await
    }
}
