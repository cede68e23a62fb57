//! SQLite connection and schema management
//!
//! Manages the `~/.tense-master/tense-master.db` database with automatic schema migration.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use super::{lock, StoreResult};

/// Shared connection handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        tracing::debug!(target: "tense_master::store", path = %path.display(), "Opened database");
        Self::init(conn)
    }

    /// Fresh private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    pub fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        lock(&self.conn)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()
    }

    /// Current schema version (0 before any migration ran)
    pub fn schema_version(&self) -> StoreResult<i32> {
        let conn = self.conn()?;
        let version = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;
        Ok(version)
    }

    fn run_migrations(&self) -> StoreResult<()> {
        let version = self.schema_version()?;
        let conn = self.conn()?;

        if version < 1 {
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (1)", [])?;
        }

        // Migration 2: gauntlet content
        if version < 2 {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS cloze_challenges (
                    id TEXT PRIMARY KEY,
                    story_template TEXT NOT NULL,
                    blanks TEXT NOT NULL          -- JSON array of {id, options, correct_answer}
                );

                CREATE TABLE IF NOT EXISTS detective_challenges (
                    id TEXT PRIMARY KEY,
                    paragraph TEXT NOT NULL,
                    errors TEXT NOT NULL          -- JSON array of {incorrect, correct}
                );

                CREATE TABLE IF NOT EXISTS identification_challenges (
                    id TEXT PRIMARY KEY,
                    sentence TEXT NOT NULL,
                    correct_tense_name TEXT NOT NULL
                );
                "#,
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        // Migration 3: profile roles
        if version < 3 {
            let role_columns: i32 = conn.query_row(
                "SELECT COUNT(*) FROM pragma_table_info('profiles') WHERE name = 'role'",
                [],
                |r| r.get(0),
            )?;
            if role_columns == 0 {
                conn.execute_batch("ALTER TABLE profiles ADD COLUMN role TEXT NOT NULL DEFAULT 'user';")?;
            }
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (3)", [])?;
        }

        Ok(())
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- One row per user; set/map columns hold JSON
CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL,
    username TEXT NOT NULL UNIQUE,
    xp INTEGER NOT NULL DEFAULT 0,
    ai_coins INTEGER NOT NULL DEFAULT 0,
    streak_days INTEGER NOT NULL DEFAULT 0,
    last_login TEXT,                              -- RFC 3339
    active_theme TEXT NOT NULL DEFAULT 'deep-space',
    achievements TEXT NOT NULL DEFAULT '[]',
    purchased_themes TEXT NOT NULL DEFAULT '["deep-space"]',
    purchased_power_ups TEXT NOT NULL DEFAULT '{}',
    course_progress TEXT NOT NULL DEFAULT '{}',
    total_quizzes_completed INTEGER NOT NULL DEFAULT 0,
    total_coins_spent INTEGER NOT NULL DEFAULT 0,
    last_challenge_completed TEXT,                -- RFC 3339
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_profiles_xp ON profiles(xp DESC);

-- User-authored courses (built-in courses are static)
CREATE TABLE IF NOT EXISTS courses (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    icon_name TEXT NOT NULL DEFAULT 'BookOpen',
    author TEXT,
    tenses TEXT NOT NULL DEFAULT '[]',            -- JSON array of {id, name}
    created_at TEXT NOT NULL
);

-- Multiple-choice questions keyed by question source
CREATE TABLE IF NOT EXISTS questions (
    id TEXT PRIMARY KEY,
    source TEXT NOT NULL,                         -- e.g. "lesson/simple-past", "daily/hard"
    prompt TEXT NOT NULL,
    options TEXT NOT NULL,                        -- JSON array
    correct_option TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_questions_source ON questions(source);
"#;
