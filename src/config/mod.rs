//! Configuration loading and management

mod io;
mod settings;

pub use settings::{NotificationSettings, Settings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::{QuizLimits, RewardTable};

/// Main configuration structure (`~/.tense-master/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Question counts and time limits
    #[serde(default)]
    pub quiz: QuizLimits,

    /// Reward formula per mode
    #[serde(default)]
    pub rewards: RewardTable,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Config {
    /// Create a config with the built-in defaults
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Database path from settings, falling back to the global config dir
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("tense-master.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChallengeMode, DailyMode};
    use crate::engine::{DayBoundary, RewardFormula};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::with_defaults());
        assert_eq!(config.notifications.stagger_ms, 600);
        assert_eq!(config.quiz.time_attack_seconds, 60);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [settings]
            day_boundary = "+120"

            [quiz]
            lesson_questions = 5

            [rewards.hard]
            kind = "flat"
            xp = 300
            coins = 150
            "#,
        )
        .unwrap();
        assert_eq!(config.settings.day_boundary, DayBoundary::Offset(120));
        assert_eq!(config.quiz.lesson_questions, 5);
        assert_eq!(config.quiz.review_questions, 15);
        assert_eq!(
            *config.rewards.formula(ChallengeMode::Daily(DailyMode::Hard)),
            RewardFormula::Flat { xp: 300, coins: 150 }
        );
    }

    #[test]
    fn test_rejects_bad_day_boundary() {
        let result: Result<Config, _> = toml::from_str("[settings]\nday_boundary = \"noon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_database_path_override() {
        let config: Config = toml::from_str("[settings]\ndatabase_path = \"/tmp/tm.db\"\n").unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/tm.db"));
    }
}
