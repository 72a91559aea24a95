//! Capability contracts for the external services the pipeline consumes.
//!
//! Both capabilities are non-deterministic black boxes with a defined
//! input/output contract. Implementations live in `planforge-model`; the
//! pipeline only ever sees these traits.

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Generate a structured record conforming to the given JSON schema
    /// descriptor. Fails on the underlying call error or on structural
    /// non-conformance after the client's own repair attempts.
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<Value>;

    /// Generate unstructured free text. Used by stages whose output format
    /// is a labeled text protocol rather than schema JSON.
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}

/// Web-search capability. Best-effort: callers must be prepared for failure.
#[async_trait]
pub trait WebSearch: Send + Sync {
    fn name(&self) -> &str;

    /// Run a search query and return up to `max_results` text snippets,
    /// ranked by relevance.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>>;
}
