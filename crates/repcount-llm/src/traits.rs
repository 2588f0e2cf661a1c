use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::CompletionOutput;

/// Default budget for a single completion call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Errors that can occur while calling a text-completion service
#[derive(Error, Debug)]
pub enum CompleterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    #[error("Completion response contained no text")]
    EmptyResponse,
}

/// Configuration for a completion call
#[derive(Debug, Clone)]
pub struct CompleterConfig {
    /// Upper bound on a single call
    pub timeout: Duration,
    /// Sampling temperature, if the provider supports it
    pub temperature: Option<f32>,
}

impl Default for CompleterConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            temperature: Some(0.0),
        }
    }
}

impl CompleterConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The text-completion collaborator used by the LLM-assisted parser
#[async_trait]
pub trait Completer: Send + Sync {
    /// Human-readable name of the provider (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Model identifier used for completions
    fn model(&self) -> &str;

    /// Complete a single prompt
    async fn complete(
        &self,
        prompt: &str,
        config: &CompleterConfig,
    ) -> Result<CompletionOutput, CompleterError>;

    /// Check whether the model answers at all
    async fn is_available(&self, config: &CompleterConfig) -> bool {
        self.complete("test", config).await.is_ok()
    }
}
