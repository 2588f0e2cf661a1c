//! Command handlers. Each returns the text to show instead of printing it.

use anyhow::{Context, Result};
use chrono::Local;
use repcount_core::{
    approaches_word, describe_record, record_from_row, reps_word, summarize, ExerciseParser,
    ParseReport,
};
use repcount_db::{Database, Session, StoredEntry, UserStats};
use repcount_parse::ExerciseRecord;
use tracing::{info, warn};

use crate::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Success,
    Info,
    Warning,
}

/// Text produced by a command
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub lines: Vec<String>,
}

impl Reply {
    fn new(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            lines: vec![text.into()],
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self::new(ReplyKind::Success, text)
    }

    fn info(text: impl Into<String>) -> Self {
        Self::new(ReplyKind::Info, text)
    }

    fn warning(text: impl Into<String>) -> Self {
        Self::new(ReplyKind::Warning, text)
    }

    fn with_lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Parse without storing anything.
pub async fn parse(parser: &ExerciseParser, text: &str) -> ParseReport {
    parser.parse_detailed(text).await
}

pub fn parse_reply(report: &ParseReport, text: &str) -> Reply {
    match &report.record {
        Some(record) => Reply::success(describe_record(record)),
        None if text.trim().is_empty() => Reply::warning(messages::NOT_RECOGNISED),
        None => Reply::warning(messages::NOT_AN_EXERCISE),
    }
}

pub fn start(db: &Database, user_id: &str) -> Result<Reply> {
    if let Some(stale) = db.workouts().active(user_id)? {
        warn!(session_id = %stale.id, user_id = %user_id, "Closing session left active");
    }

    let session = db.workouts().start(user_id).context("Failed to start session")?;
    info!(session_id = %session.id, user_id = %user_id, "Session started");

    Ok(Reply::success(messages::SESSION_STARTED))
}

pub async fn add(
    db: &Database,
    parser: &ExerciseParser,
    user_id: &str,
    text: &str,
) -> Result<Reply> {
    let Some(session) = db.workouts().active(user_id)? else {
        return Ok(Reply::warning(messages::NO_ACTIVE_SESSION));
    };

    if text.trim().is_empty() {
        return Ok(Reply::warning(messages::NOT_RECOGNISED));
    }

    let Some(record) = parser.parse(text).await else {
        info!(text = %text, "Utterance not recorded");
        return Ok(Reply::warning(messages::NOT_AN_EXERCISE));
    };

    let entry_id = db
        .workouts()
        .add_entry(&session.id, &record)
        .context("Failed to store entry")?;
    info!(
        session_id = %session.id,
        entry_id = entry_id,
        name = record.name(),
        reps = record.reps(),
        "Entry recorded"
    );

    Ok(Reply::success(format!(
        "{} {}",
        messages::RECORDED,
        describe_record(&record)
    )))
}

pub fn stop(db: &Database, user_id: &str) -> Result<Reply> {
    let Some(session) = db.workouts().stop(user_id)? else {
        return Ok(Reply::warning(messages::NOTHING_TO_STOP));
    };
    info!(session_id = %session.id, user_id = %user_id, "Session finished");

    let records = session_records(db, &session)?;
    if records.is_empty() {
        return Ok(Reply::info(messages::SESSION_FINISHED_EMPTY));
    }

    Ok(Reply::success(messages::SESSION_FINISHED).with_lines(summarize(&records)))
}

pub fn last(db: &Database, user_id: &str) -> Result<Reply> {
    let Some(session) = db.workouts().last_finished(user_id)? else {
        return Ok(Reply::info(messages::NO_FINISHED_SESSIONS));
    };

    let records = session_records(db, &session)?;
    if records.is_empty() {
        return Ok(Reply::info(messages::LAST_SESSION_EMPTY));
    }

    let started = session
        .started_at
        .with_timezone(&Local)
        .format("%d.%m.%Y %H:%M");
    Ok(
        Reply::info(format!("{} ({}):", messages::LAST_SESSION, started))
            .with_lines(summarize(&records)),
    )
}

pub fn stats(db: &Database, user_id: &str) -> Result<(UserStats, Reply)> {
    let stats = db.workouts().stats(user_id)?;
    let reply = stats_reply(&stats);
    Ok((stats, reply))
}

fn stats_reply(stats: &UserStats) -> Reply {
    if stats.finished_sessions == 0 {
        return Reply::info(messages::NO_FINISHED_SESSIONS);
    }

    let mut lines = vec![
        format!("🏋️ Кількість тренувань: {}", stats.finished_sessions),
        format!("💪 Загальна кількість вправ: {}", stats.total_entries),
    ];

    if !stats.top_exercises.is_empty() {
        lines.push(String::new());
        lines.push(messages::STATS_TOP.to_string());
        for (i, top) in stats.top_exercises.iter().enumerate() {
            let total = top.total_reps.max(0) as u64;
            let sets = top.sets as u64;
            lines.push(format!(
                "{}. {}: {} {} ({} {})",
                i + 1,
                top.name,
                total,
                reps_word(total),
                sets,
                approaches_word(sets)
            ));
        }
    }

    Reply::info(messages::STATS_HEADER).with_lines(lines)
}

fn session_records(db: &Database, session: &Session) -> Result<Vec<ExerciseRecord>> {
    let entries = db.workouts().entries(&session.id)?;
    entries
        .iter()
        .map(|StoredEntry { name, reps, weight, .. }| {
            record_from_row(name, *reps, *weight).map_err(anyhow::Error::from)
        })
        .collect()
}
