//! Database layer for repcount.
//!
//! A single `Database` owns the SQLite connection and hands out the
//! workout store, which borrows the connection for the duration of a call.

mod workouts;

pub use workouts::{ExerciseStat, Session, StoredEntry, UserStats, Workouts};

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The main database struct that owns the SQLite connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the default location.
    ///
    /// The default location is `~/.local/share/repcount/repcount.db`.
    pub fn open() -> Result<Self, rusqlite::Error> {
        Self::open_at(&Self::default_path())
    }

    /// Open or create a database at a specific path, creating parent directories.
    pub fn open_at(path: &Path) -> Result<Self, rusqlite::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (useful for testing).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("repcount")
            .join("repcount.db")
    }

    /// Access the workout store.
    pub fn workouts(&self) -> Workouts<'_> {
        let conn = self.conn.lock().expect("Database lock poisoned");
        Workouts::new(conn)
    }

    fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                started_at TEXT NOT NULL,
                ended_at TEXT
            );

            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL
            );

            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                reps INTEGER NOT NULL,
                weight REAL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_user_active ON sessions(user_id, ended_at);
            CREATE INDEX IF NOT EXISTS idx_entries_session ON entries(session_id);
            "#,
        )
    }
}
