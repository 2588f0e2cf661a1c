use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::{Completer, CompleterConfig, CompleterError, CompletionOutput};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini `generateContent` completer
pub struct GeminiCompleter {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiCompleter {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the completer at a different API host (proxies, local gateways)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiResponse {
    fn into_text(self) -> String {
        self.candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl Completer for GeminiCompleter {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        prompt: &str,
        config: &CompleterConfig,
    ) -> Result<CompletionOutput, CompleterError> {
        let start = Instant::now();

        debug!(
            provider = self.name(),
            model = %self.model,
            prompt_len = prompt.len(),
            "Requesting completion"
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiTextPart { text: prompt }],
            }],
            generation_config: config
                .temperature
                .map(|temperature| GeminiGenerationConfig { temperature }),
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .timeout(config.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompleterError::Timeout(config.timeout)
                } else {
                    CompleterError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompleterError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: GeminiResponse = response.json().await?;

        if let Some(error) = api_response.error {
            return Err(CompleterError::Api {
                status: status.as_u16(),
                body: error.message,
            });
        }

        let text = api_response.into_text();
        if text.trim().is_empty() {
            return Err(CompleterError::EmptyResponse);
        }

        let duration = start.elapsed();
        debug!(
            model = %self.model,
            duration_ms = duration.as_millis(),
            response_len = text.len(),
            "Completion received"
        );

        Ok(CompletionOutput::new(text, self.model.clone(), duration))
    }
}
