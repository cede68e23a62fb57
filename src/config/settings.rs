//! Settings configuration types

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::DayBoundary;

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite database file. Defaults to `~/.tense-master/tense-master.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Calendar used for streaks and the daily challenge: `utc`, `local`, or
    /// a minutes offset such as `"+120"`
    #[serde(default)]
    pub day_boundary: DayBoundary,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            day_boundary: DayBoundary::Utc,
        }
    }
}

/// Notification playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Gap between consecutive achievement notifications
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
}

fn default_stagger_ms() -> u64 {
    600
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            stagger_ms: default_stagger_ms(),
        }
    }
}

impl NotificationSettings {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}
