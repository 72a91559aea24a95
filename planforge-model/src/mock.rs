//! Scripted capability clients for tests.
//!
//! Replies are queued up front and consumed in call order; invocation
//! counters let tests assert how many times a stage actually reached for a
//! capability.

use async_trait::async_trait;
use planforge_core::{PlanError, Result, TextGenerator, WebSearch};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum Scripted<T> {
    Reply(T),
    Fail(String),
}

pub struct MockGenerator {
    name: String,
    structured: Mutex<VecDeque<Scripted<Value>>>,
    text: Mutex<VecDeque<Scripted<String>>>,
    structured_calls: AtomicUsize,
    text_calls: AtomicUsize,
}

impl MockGenerator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structured: Mutex::new(VecDeque::new()),
            text: Mutex::new(VecDeque::new()),
            structured_calls: AtomicUsize::new(0),
            text_calls: AtomicUsize::new(0),
        }
    }

    /// Queue a structured reply.
    pub fn with_structured(self, value: Value) -> Self {
        self.structured.lock().unwrap().push_back(Scripted::Reply(value));
        self
    }

    /// Queue a structured-call failure.
    pub fn with_structured_error(self, message: impl Into<String>) -> Self {
        self.structured.lock().unwrap().push_back(Scripted::Fail(message.into()));
        self
    }

    /// Queue a free-text reply.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.text.lock().unwrap().push_back(Scripted::Reply(text.into()));
        self
    }

    /// Queue a free-text-call failure.
    pub fn with_text_error(self, message: impl Into<String>) -> Self {
        self.text.lock().unwrap().push_back(Scripted::Fail(message.into()));
        self
    }

    /// Number of structured generation calls made so far.
    pub fn structured_calls(&self) -> usize {
        self.structured_calls.load(Ordering::SeqCst)
    }

    /// Number of free-text generation calls made so far.
    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_structured(&self, _prompt: &str, _schema: &Value) -> Result<Value> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);
        match self.structured.lock().unwrap().pop_front() {
            Some(Scripted::Reply(value)) => Ok(value),
            Some(Scripted::Fail(message)) => Err(PlanError::Capability(message)),
            None => Err(PlanError::Capability("mock generator script exhausted".to_string())),
        }
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        match self.text.lock().unwrap().pop_front() {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Fail(message)) => Err(PlanError::Capability(message)),
            None => Err(PlanError::Capability("mock generator script exhausted".to_string())),
        }
    }
}

pub struct MockSearch {
    snippets: Vec<String>,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl MockSearch {
    pub fn new() -> Self {
        Self { snippets: vec![], fail_with: None, calls: AtomicUsize::new(0) }
    }

    pub fn with_snippets<I, T>(mut self, snippets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.snippets = snippets.into_iter().map(Into::into).collect();
        self
    }

    /// Make every search call fail with the given message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(PlanError::Search(message.clone()));
        }
        Ok(self.snippets.iter().take(max_results).cloned().collect())
    }
}
