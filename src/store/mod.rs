//! Content and profile stores
//!
//! The engine talks to persistence only through [`ContentStore`] (read-only)
//! and [`ProfileStore`] (snapshot read, single partial update). Two
//! implementations ship: [`SqliteStore`] for the CLI and [`MemoryStore`] for
//! tests.

mod db;
mod import;
mod memory;
mod sqlite;

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{
    ClozeTestChallenge, CourseCatalog, GrammarDetectiveChallenge, ProfileUpdate, Question,
    QuestionSource, TenseIdentificationChallenge, UserProfile,
};
use crate::engine::Standing;

pub use db::Database;
pub use import::{ContentPack, ImportSummary};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> StoreResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
}

/// Read-only course and challenge content
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All questions stored for `source`, unshuffled
    async fn fetch_questions(&self, source: &QuestionSource) -> StoreResult<Vec<Question>>;

    /// Built-in courses followed by custom ones
    async fn fetch_catalog(&self) -> StoreResult<CourseCatalog>;

    async fn fetch_cloze(&self) -> StoreResult<Vec<ClozeTestChallenge>>;

    async fn fetch_detective(&self) -> StoreResult<Vec<GrammarDetectiveChallenge>>;

    async fn fetch_identification(&self) -> StoreResult<Vec<TenseIdentificationChallenge>>;
}

/// Canonical per-user state
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, user_id: &str) -> StoreResult<UserProfile>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserProfile>>;

    async fn create_profile(&self, profile: &UserProfile) -> StoreResult<()>;

    /// Apply every set field of `update` atomically. Last write wins.
    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> StoreResult<()>;

    /// XP standing of every profile, in no particular order
    async fn leaderboard(&self) -> StoreResult<Vec<Standing>>;
}
