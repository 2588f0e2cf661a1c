use std::sync::Arc;

use repcount_parse::ParseOutcome;
use tracing::{debug, info, warn};

use crate::{Completer, CompleterConfig, ExercisePrompts, LlmVerdict};

/// Parser stage that delegates to a text-completion collaborator.
///
/// Failures of any kind (missing collaborator, transport error, timeout,
/// malformed output) become [`ParseOutcome::Inconclusive`].
pub struct LlmParser {
    completer: Option<Arc<dyn Completer>>,
    config: CompleterConfig,
}

impl LlmParser {
    pub fn new(completer: Option<Arc<dyn Completer>>, config: CompleterConfig) -> Self {
        Self { completer, config }
    }

    /// Parser with no collaborator; always inconclusive
    pub fn disabled() -> Self {
        Self::new(None, CompleterConfig::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.completer.is_some()
    }

    /// Model used by the collaborator, if any
    pub fn model(&self) -> Option<&str> {
        self.completer.as_deref().map(|c| c.model())
    }

    pub async fn parse(&self, text: &str) -> ParseOutcome {
        let Some(completer) = self.completer.as_deref() else {
            debug!("No completer configured");
            return ParseOutcome::Inconclusive;
        };

        let prompt = ExercisePrompts::build_parse_prompt(text);

        debug!(
            provider = completer.name(),
            model = completer.model(),
            prompt_len = prompt.len(),
            "Running LLM parse"
        );

        let call = completer.complete(&prompt, &self.config);
        let output = match tokio::time::timeout(self.config.timeout, call).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(error = %e, model = completer.model(), "Completion failed");
                return ParseOutcome::Inconclusive;
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.timeout.as_secs_f64(),
                    model = completer.model(),
                    "Completion timed out"
                );
                return ParseOutcome::Inconclusive;
            }
        };

        debug!(
            duration_secs = output.duration.as_secs_f64(),
            response_lines = output.lines(),
            "Completion received"
        );

        match LlmVerdict::parse(&output.text) {
            Ok(LlmVerdict::Exercise(record)) => {
                info!(name = record.name(), reps = record.reps(), "LLM parsed exercise");
                ParseOutcome::Valid(record)
            }
            Ok(LlmVerdict::NotExercise) => {
                info!("LLM rejected text as not an exercise");
                ParseOutcome::ExplicitNonExercise
            }
            Err(e) => {
                warn!(error = %e, response = %output.text, "Unusable completion output");
                ParseOutcome::Inconclusive
            }
        }
    }
}
