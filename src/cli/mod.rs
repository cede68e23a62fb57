//! CLI command implementations

pub mod gauntlet;
pub mod import;
pub mod init;
pub mod profile;
pub mod quiz;
pub mod shop;

mod prompt;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::Utc;

use tense_master::config::Config;
use tense_master::notify::{play, ConsoleSink, Scheduled};
use tense_master::store::SqliteStore;
use tense_master::Session;

pub use prompt::Prompt;

/// Loaded config plus an open store, shared by every command
pub struct Context {
    pub config: Config,
    pub store: SqliteStore,
}

impl Context {
    pub fn open(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(PathBuf::from)
            .unwrap_or_else(Config::global_config_path);
        let config = Config::load_or_init(&config_path)?;

        let db_path = config.database_path();
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

        Ok(Self { config, store })
    }

    /// Log `user` in, recording today's visit for the streak
    pub async fn login(&self, user: Option<&str>) -> Result<Session> {
        let username = user.context("No user given: pass --user <name> or set TENSE_MASTER_USER")?;
        Session::login(&self.store, username, Utc::now(), self.config.settings.day_boundary)
            .await
            .with_context(|| format!("Failed to log in as '{username}'"))
    }

    pub async fn announce(&self, schedule: &[Scheduled]) {
        play(schedule, &ConsoleSink).await;
    }
}
