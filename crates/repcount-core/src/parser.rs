use std::fmt;

use repcount_llm::LlmParser;
use repcount_parse::{ExerciseRecord, FallbackParser, ParseOutcome, RuleParser};
use serde::Serialize;
use tracing::{debug, info};

/// Which stage settled the parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseSource {
    /// The LLM-assisted parser produced the record
    Llm,
    /// The rule-based fallback produced the record
    Fallback,
    /// The LLM-assisted parser positively rejected the text
    Rejected,
    /// No stage produced a record
    Unparsed,
}

impl fmt::Display for ParseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseSource::Llm => write!(f, "llm"),
            ParseSource::Fallback => write!(f, "fallback"),
            ParseSource::Rejected => write!(f, "rejected"),
            ParseSource::Unparsed => write!(f, "unparsed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseReport {
    pub record: Option<ExerciseRecord>,
    pub source: ParseSource,
}

impl ParseReport {
    fn parsed(record: ExerciseRecord, source: ParseSource) -> Self {
        Self {
            record: Some(record),
            source,
        }
    }

    fn empty(source: ParseSource) -> Self {
        Self {
            record: None,
            source,
        }
    }
}

/// Runs the LLM-assisted parser, then the fallback when the first is inconclusive
pub struct ExerciseParser {
    llm: LlmParser,
    fallback: Box<dyn FallbackParser>,
}

impl ExerciseParser {
    pub fn new(llm: LlmParser) -> Self {
        Self::with_fallback(llm, Box::new(RuleParser::new()))
    }

    pub fn with_fallback(llm: LlmParser, fallback: Box<dyn FallbackParser>) -> Self {
        Self { llm, fallback }
    }

    pub fn llm(&self) -> &LlmParser {
        &self.llm
    }

    /// Parse an utterance, reporting which stage decided.
    ///
    /// At most one collaborator call and one fallback call happen per input.
    /// An explicit rejection from the collaborator is final.
    pub async fn parse_detailed(&self, text: &str) -> ParseReport {
        if text.trim().is_empty() {
            debug!("Blank input, skipping parsers");
            return ParseReport::empty(ParseSource::Unparsed);
        }

        let outcome = self.llm.parse(text).await;
        debug!(outcome = %outcome.short_description(), "LLM stage finished");

        match outcome {
            ParseOutcome::Valid(record) => return ParseReport::parsed(record, ParseSource::Llm),
            ParseOutcome::ExplicitNonExercise => {
                info!(text = %text, "Text rejected as not an exercise");
                return ParseReport::empty(ParseSource::Rejected);
            }
            ParseOutcome::Inconclusive => {}
        }

        let outcome = self.fallback.parse(text);
        debug!(
            parser = self.fallback.name(),
            outcome = %outcome.short_description(),
            "Fallback stage finished"
        );

        match outcome.into_record() {
            Some(record) => ParseReport::parsed(record, ParseSource::Fallback),
            None => ParseReport::empty(ParseSource::Unparsed),
        }
    }

    pub async fn parse(&self, text: &str) -> Option<ExerciseRecord> {
        self.parse_detailed(text).await.record
    }
}
