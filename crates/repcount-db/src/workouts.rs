//! Workout sessions, exercises and their recorded sets.

use chrono::{DateTime, SecondsFormat, Utc};
use repcount_parse::ExerciseRecord;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::sync::MutexGuard;
use uuid::Uuid;

/// A workout session. Active while `ended_at` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// A set as stored; column values are returned unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    pub id: i64,
    pub name: String,
    pub reps: i64,
    pub weight: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Per-exercise totals across a user's sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseStat {
    pub name: String,
    pub sets: usize,
    pub total_reps: i64,
}

/// Aggregate statistics for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub finished_sessions: usize,
    pub total_entries: usize,
    /// Up to three exercises with the most recorded sets
    pub top_exercises: Vec<ExerciseStat>,
}

const TOP_EXERCISES: i64 = 3;

/// Workout store with a borrowed connection.
pub struct Workouts<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> Workouts<'db> {
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// Start a new session for `user_id`, ending any session left active.
    pub fn start(&self, user_id: &str) -> Result<Session, rusqlite::Error> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            started_at: now,
            ended_at: None,
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE sessions SET ended_at = ?1 WHERE user_id = ?2 AND ended_at IS NULL",
            params![timestamp(&now), user_id],
        )?;
        tx.execute(
            "INSERT INTO sessions (id, user_id, started_at) VALUES (?1, ?2, ?3)",
            params![session.id, session.user_id, timestamp(&now)],
        )?;
        tx.commit()?;

        Ok(session)
    }

    /// The user's active session, if any.
    pub fn active(&self, user_id: &str) -> Result<Option<Session>, rusqlite::Error> {
        self.conn
            .query_row(
                r#"
                SELECT id, user_id, started_at, ended_at
                FROM sessions
                WHERE user_id = ?1 AND ended_at IS NULL
                ORDER BY started_at DESC
                LIMIT 1
                "#,
                params![user_id],
                Self::row_to_session,
            )
            .optional()
    }

    pub fn get(&self, id: &str) -> Result<Option<Session>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT id, user_id, started_at, ended_at FROM sessions WHERE id = ?1",
                params![id],
                Self::row_to_session,
            )
            .optional()
    }

    /// Append a set to a session, returning the entry id.
    pub fn add_entry(&self, session_id: &str, record: &ExerciseRecord) -> Result<i64, rusqlite::Error> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO exercises (name) VALUES (?1)",
            params![record.name()],
        )?;
        let exercise_id: i64 = tx.query_row(
            "SELECT id FROM exercises WHERE name = ?1",
            params![record.name()],
            |row| row.get(0),
        )?;
        tx.execute(
            r#"
            INSERT INTO entries (session_id, exercise_id, reps, weight, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                session_id,
                exercise_id,
                i64::from(record.reps()),
                record.weight(),
                timestamp(&Utc::now()),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    /// End the user's active session, returning it with `ended_at` set.
    pub fn stop(&self, user_id: &str) -> Result<Option<Session>, rusqlite::Error> {
        let Some(mut session) = self.active(user_id)? else {
            return Ok(None);
        };

        let now = Utc::now();
        self.conn.execute(
            "UPDATE sessions SET ended_at = ?1 WHERE id = ?2",
            params![timestamp(&now), session.id],
        )?;
        session.ended_at = Some(now);

        Ok(Some(session))
    }

    /// The most recently ended session of the user.
    pub fn last_finished(&self, user_id: &str) -> Result<Option<Session>, rusqlite::Error> {
        self.conn
            .query_row(
                r#"
                SELECT id, user_id, started_at, ended_at
                FROM sessions
                WHERE user_id = ?1 AND ended_at IS NOT NULL
                ORDER BY ended_at DESC, rowid DESC
                LIMIT 1
                "#,
                params![user_id],
                Self::row_to_session,
            )
            .optional()
    }

    /// All sets of a session, ordered by exercise name, then recording time.
    pub fn entries(&self, session_id: &str) -> Result<Vec<StoredEntry>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT en.id, ex.name, en.reps, en.weight, en.created_at
            FROM entries en
            JOIN exercises ex ON en.exercise_id = ex.id
            WHERE en.session_id = ?1
            ORDER BY ex.name, en.created_at, en.id
            "#,
        )?;

        let rows = stmt.query_map(params![session_id], |row| {
            Ok(StoredEntry {
                id: row.get(0)?,
                name: row.get(1)?,
                reps: row.get(2)?,
                weight: row.get(3)?,
                created_at: parse_timestamp(row, 4)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }

        Ok(entries)
    }

    /// Totals over every session of the user.
    pub fn stats(&self, user_id: &str) -> Result<UserStats, rusqlite::Error> {
        let finished_sessions: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE user_id = ?1 AND ended_at IS NOT NULL",
            params![user_id],
            |row| row.get(0),
        )?;

        let total_entries: i64 = self.conn.query_row(
            r#"
            SELECT COUNT(*) FROM entries
            WHERE session_id IN (SELECT id FROM sessions WHERE user_id = ?1)
            "#,
            params![user_id],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            r#"
            SELECT ex.name, COUNT(*) AS sets, SUM(en.reps) AS total_reps
            FROM entries en
            JOIN exercises ex ON en.exercise_id = ex.id
            WHERE en.session_id IN (SELECT id FROM sessions WHERE user_id = ?1)
            GROUP BY ex.name
            ORDER BY sets DESC, ex.name
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(params![user_id, TOP_EXERCISES], |row| {
            Ok(ExerciseStat {
                name: row.get(0)?,
                sets: row.get::<_, i64>(1)? as usize,
                total_reps: row.get(2)?,
            })
        })?;

        let mut top_exercises = Vec::new();
        for row in rows {
            top_exercises.push(row?);
        }

        Ok(UserStats {
            finished_sessions: finished_sessions as usize,
            total_entries: total_entries as usize,
            top_exercises,
        })
    }

    fn row_to_session(row: &rusqlite::Row) -> Result<Session, rusqlite::Error> {
        let ended_at = match row.get::<_, Option<String>>(3)? {
            Some(_) => Some(parse_timestamp(row, 3)?),
            None => None,
        };

        Ok(Session {
            id: row.get(0)?,
            user_id: row.get(1)?,
            started_at: parse_timestamp(row, 2)?,
            ended_at,
        })
    }
}

/// Fixed-width UTC timestamps so that text ordering matches time ordering.
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
