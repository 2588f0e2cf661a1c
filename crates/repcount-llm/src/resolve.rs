use std::sync::Arc;

use tracing::{info, warn};

use crate::{Completer, CompleterConfig, GeminiCompleter};

/// Models probed in order when none are configured
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];

/// Return the first candidate that answers a probe call.
pub async fn resolve_from_candidates(
    candidates: Vec<Arc<dyn Completer>>,
    config: &CompleterConfig,
) -> Option<Arc<dyn Completer>> {
    for candidate in candidates {
        if candidate.is_available(config).await {
            info!(
                provider = candidate.name(),
                model = candidate.model(),
                "Using completion model"
            );
            return Some(candidate);
        }
        warn!(
            provider = candidate.name(),
            model = candidate.model(),
            "Completion model unavailable"
        );
    }

    warn!("No completion model available, LLM parsing disabled");
    None
}

/// Resolve a Gemini model, trying each name in order.
///
/// An absent or blank key disables the collaborator without any network call.
pub async fn resolve_completer(
    api_key: Option<&str>,
    models: &[String],
    config: &CompleterConfig,
) -> Option<Arc<dyn Completer>> {
    let Some(api_key) = api_key.map(str::trim).filter(|key| !key.is_empty()) else {
        info!("Gemini API key not set, LLM parsing disabled");
        return None;
    };

    let candidates = models
        .iter()
        .map(|model| Arc::new(GeminiCompleter::new(api_key, model.as_str())) as Arc<dyn Completer>)
        .collect();

    resolve_from_candidates(candidates, config).await
}
