//! # planforge-model
//!
//! Capability client implementations for the Planforge pipeline:
//!
//! - [`OpenAICompatibleGenerator`] — text generation against any
//!   OpenAI-compatible chat-completions endpoint.
//! - [`TavilySearch`] — web search against the Tavily REST API.
//! - [`MockGenerator`] / [`MockSearch`] — scripted clients for tests.
//!
//! Transport-level retry lives in [`retry`]; it is distinct from any
//! stage-level semantic retry the pipeline performs.

pub mod mock;
pub mod openai_compatible;
pub mod retry;
pub mod search;

pub use mock::{MockGenerator, MockSearch};
pub use openai_compatible::{OpenAICompatibleConfig, OpenAICompatibleGenerator};
pub use retry::{execute_with_retry, is_retryable_capability_error, RetryConfig};
pub use search::{TavilyConfig, TavilySearch};
