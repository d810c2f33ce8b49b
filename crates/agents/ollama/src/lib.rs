//! Ollama-backed word-snake player.
//!
//! Sends the whole conversation view to `POST {host}/api/chat` with streaming
//! disabled and returns the assistant message content. The call blocks until
//! the model answers; the only timeout is the optional one in
//! [`OllamaConfig`]. Failures are never retried here.

use serde::{Deserialize, Serialize};
use snake_core::{Agent, InferenceError, Message};
use std::time::Duration;


/// Default Ollama server address.
pub const DEFAULT_HOST: &str = "http://127.0.0.1:11434";

/// Connection settings for an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL, e.g. `http://127.0.0.1:11434`.
    pub host: String,
    /// Model tag, e.g. `llama3:8b-instruct-q8_0`.
    pub model: String,
    /// Whole-request timeout (None = wait as long as the model needs)
    pub timeout: Option<Duration>,
}

impl OllamaConfig {
    pub fn new(model: &str) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            model: model.to_string(),
            timeout: None,
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.host.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// A player whose replies come from an Ollama model.
pub struct OllamaAgent {
    config: OllamaConfig,
    agent: ureq::Agent,
}

impl OllamaAgent {
    pub fn new(config: OllamaConfig) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(config.timeout)
                .build(),
        );
        Self { config, agent }
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

impl Agent for OllamaAgent {
    fn reply(&mut self, messages: &[Message]) -> Result<String, InferenceError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
        };

        tracing::trace!(
            model = %self.config.model,
            messages = messages.len(),
            "sending chat request"
        );

        let response = self
            .agent
            .post(self.config.chat_url())
            .send_json(&request)
            .map_err(classify_error)?;

        let body: ChatResponse = response
            .into_body()
            .read_json()
            .map_err(|e| InferenceError::Decode(format!("failed to parse chat response: {}", e)))?;

        Ok(body.message.content)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

fn classify_error(err: ureq::Error) -> InferenceError {
    match err {
        ureq::Error::StatusCode(code) => InferenceError::Status(code),
        other => InferenceError::Transport(other.to_string()),
    }
}
