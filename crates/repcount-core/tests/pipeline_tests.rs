use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use repcount_core::{format_record, summarize, ExerciseParser, ParseSource};
use repcount_llm::{Completer, CompleterConfig, CompleterError, CompletionOutput, LlmParser};
use repcount_parse::{fallback_parse, ExerciseRecord, FallbackParser, ParseOutcome};

/// Helper: a completer that replays one canned reply and counts calls.
struct ScriptedCompleter {
    reply: Option<&'static str>,
    calls: AtomicUsize,
}

impl ScriptedCompleter {
    fn replying(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Completer for ScriptedCompleter {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(
        &self,
        _prompt: &str,
        _config: &CompleterConfig,
    ) -> Result<CompletionOutput, CompleterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Some(text) => Ok(CompletionOutput::new(
                text.to_string(),
                "scripted-model".to_string(),
                Duration::from_millis(1),
            )),
            None => Err(CompleterError::Api {
                status: 503,
                body: "unavailable".to_string(),
            }),
        }
    }
}

/// Helper: rule-based fallback that counts invocations.
struct CountingFallback {
    calls: Arc<AtomicUsize>,
}

impl FallbackParser for CountingFallback {
    fn name(&self) -> &str {
        "counting"
    }

    fn parse(&self, text: &str) -> ParseOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        fallback_parse(text)
    }
}

fn build_parser(completer: Option<Arc<ScriptedCompleter>>) -> (ExerciseParser, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let completer = completer.map(|c| c as Arc<dyn Completer>);
    let parser = ExerciseParser::with_fallback(
        LlmParser::new(completer, CompleterConfig::default()),
        Box::new(CountingFallback {
            calls: calls.clone(),
        }),
    );
    (parser, calls)
}

// ============================================================
// Orchestration
// ============================================================

#[tokio::test]
async fn test_llm_record_is_used_verbatim() {
    let completer = ScriptedCompleter::replying(
        r#"{"name": "французький жим лежачи", "reps": 12, "weight": 40}"#,
    );
    let (parser, fallback_calls) = build_parser(Some(completer.clone()));

    let report = parser
        .parse_detailed("французький жим лежачи 12 повторів з вагою 40 кг")
        .await;

    assert_eq!(report.source, ParseSource::Llm);
    assert_eq!(
        report.record,
        ExerciseRecord::new("французький жим лежачи", 12, Some(40.0))
    );
    assert_eq!(completer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_not_exercise_never_falls_back() {
    let completer = ScriptedCompleter::replying(r#"{"error": "not_exercise"}"#);
    let (parser, fallback_calls) = build_parser(Some(completer.clone()));

    // The fallback alone would accept this text
    assert!(fallback_parse("приїде 20 разів").is_valid());

    let report = parser.parse_detailed("приїде 20 разів").await;
    assert_eq!(report.source, ParseSource::Rejected);
    assert!(report.record.is_none());
    assert_eq!(completer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unconfigured_collaborator_matches_fallback() {
    let inputs = [
        "приїде 20 разів",
        "банан 20 разів",
        "жим лежачи 10 повторів 80 кг",
        "відтискань я 15",
        "музика грає",
    ];
    for text in inputs {
        let (parser, fallback_calls) = build_parser(None);
        let expected = fallback_parse(text).into_record();
        assert_eq!(parser.parse(text).await, expected, "input: {}", text);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn test_failing_collaborator_matches_fallback() {
    let completer = ScriptedCompleter::failing();
    let (parser, fallback_calls) = build_parser(Some(completer.clone()));

    let report = parser.parse_detailed("приїде 20 разів").await;
    assert_eq!(report.source, ParseSource::Fallback);
    assert_eq!(report.record, fallback_parse("приїде 20 разів").into_record());
    assert_eq!(completer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_reply_falls_back() {
    let replies = [
        "Це присідання, 20 разів.",
        r#"{"name": "присідання", "reps": "двадцять"}"#,
        r#"{"name": "", "reps": 20}"#,
        r#"{"error": "quota_exceeded"}"#,
    ];
    for reply in replies {
        let (parser, fallback_calls) = build_parser(Some(ScriptedCompleter::replying(reply)));
        let report = parser.parse_detailed("приїде 20 разів").await;
        assert_eq!(report.source, ParseSource::Fallback, "reply: {}", reply);
        assert_eq!(
            report.record,
            ExerciseRecord::new("присідання", 20, None),
            "reply: {}",
            reply
        );
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn test_unrecognised_text_is_unparsed() {
    let (parser, fallback_calls) = build_parser(Some(ScriptedCompleter::failing()));
    let report = parser.parse_detailed("банан 20 разів").await;
    assert_eq!(report.source, ParseSource::Unparsed);
    assert!(report.record.is_none());
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

// ============================================================
// Parse then summarize
// ============================================================

#[tokio::test]
async fn test_session_summary_from_utterances() {
    let (parser, _) = build_parser(None);
    let utterances = [
        "присідання 10 разів",
        "присідання 10 разів 20 кг",
        "присідання 5 разів з вагою 20",
        "жим лежачи 8 повторів 60 кг",
    ];

    let mut entries = Vec::new();
    for text in utterances {
        let record = parser.parse(text).await;
        assert!(record.is_some(), "failed to parse: {}", text);
        entries.extend(record);
    }

    assert_eq!(
        format_record(&entries[3]),
        "• жим лежачи – 8 повторів з вагою 60 кг"
    );
    assert_eq!(
        summarize(&entries),
        vec![
            "• присідання – 3 підходи, 25 повторів:",
            "  - 15 повторів з вагою 20 кг",
            "  - 10 повторів без ваги",
            "• жим лежачи – 8 повторів з вагою 60 кг",
        ]
    );
}
