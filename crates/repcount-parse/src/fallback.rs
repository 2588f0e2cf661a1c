use tracing::debug;

use crate::names::canonicalize;
use crate::numbers::{extract_reps, extract_weight};
use crate::{ExerciseRecord, ParseOutcome};

/// A synchronous parser stage that runs without external services
pub trait FallbackParser: Send + Sync {
    /// Human-readable name of the parser
    fn name(&self) -> &str;

    /// Parse a single utterance
    fn parse(&self, text: &str) -> ParseOutcome;
}

/// Rule-based parser built from the number extractor and the name table
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleParser;

impl RuleParser {
    pub fn new() -> Self {
        Self
    }
}

impl FallbackParser for RuleParser {
    fn name(&self) -> &str {
        "rules"
    }

    fn parse(&self, text: &str) -> ParseOutcome {
        fallback_parse(text)
    }
}

/// Parse an utterance with rules only.
///
/// Never returns [`ParseOutcome::ExplicitNonExercise`]: missing evidence is
/// not proof that the text is unrelated to exercise.
pub fn fallback_parse(text: &str) -> ParseOutcome {
    let original = text.trim();
    let lower = original.to_lowercase();

    if !lower.chars().any(|c| c.is_ascii_digit()) {
        debug!("No digits in text");
        return ParseOutcome::Inconclusive;
    }

    let Some(reps) = extract_reps(&lower) else {
        debug!("No repetition count found");
        return ParseOutcome::Inconclusive;
    };

    let weight = extract_weight(&lower);

    let Some(name) = canonicalize(original, &lower) else {
        debug!(reps = reps, "No exercise name found");
        return ParseOutcome::Inconclusive;
    };

    let outcome: ParseOutcome = ExerciseRecord::new(&name, reps, weight).into();
    debug!(outcome = %outcome.short_description(), "Rule parser finished");
    outcome
}
