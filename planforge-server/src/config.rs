use std::{sync::Arc, time::Duration};

use planforge_pipeline::Pipeline;

use crate::store::ProjectStore;

/// Security configuration for the Planforge server.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Allowed origins for CORS (empty = allow all, for development only).
    pub allowed_origins: Vec<String>,
    /// Request timeout duration (default: 30 seconds).
    pub request_timeout: Duration,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { allowed_origins: Vec::new(), request_timeout: Duration::from_secs(30) }
    }
}

impl SecurityConfig {
    pub fn production(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins, request_timeout: Duration::from_secs(30) }
    }
}

/// Configuration for the Planforge server.
#[derive(Clone)]
pub struct ServerConfig {
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<dyn ProjectStore>,
    pub security: SecurityConfig,
}

impl ServerConfig {
    pub fn new(pipeline: Arc<Pipeline>, store: Arc<dyn ProjectStore>) -> Self {
        Self { pipeline, store, security: SecurityConfig::default() }
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }
}
