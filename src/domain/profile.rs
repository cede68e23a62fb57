//! User profile snapshot and partial updates

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Theme every profile starts with
pub const DEFAULT_THEME: &str = "deep-space";

/// Progress on a single tense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TenseProgress {
    /// Once true, stays true
    pub completed: bool,
    /// Best score so far (0-100)
    pub score: u32,
}

/// Progress per tense id within one course
pub type CourseProgress = BTreeMap<String, TenseProgress>;

/// Progress per course id
pub type AllCourseProgress = BTreeMap<String, CourseProgress>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

/// Canonical per-user state, owned by the profile store.
///
/// The engine only ever works on one snapshot of this and proposes a single
/// [`ProfileUpdate`] back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub xp: u64,
    pub ai_coins: u64,
    pub streak_days: u32,
    pub last_login: Option<DateTime<Utc>>,
    pub active_theme: String,
    pub achievements: BTreeSet<String>,
    pub purchased_themes: BTreeSet<String>,
    pub purchased_power_ups: BTreeMap<String, u32>,
    pub course_progress: AllCourseProgress,
    pub total_quizzes_completed: u32,
    pub total_coins_spent: u64,
    pub last_challenge_completed: Option<DateTime<Utc>>,
    pub role: Role,
}

impl UserProfile {
    /// A fresh profile with no progress
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            username: username.into(),
            xp: 0,
            ai_coins: 0,
            streak_days: 0,
            last_login: None,
            active_theme: DEFAULT_THEME.to_string(),
            achievements: BTreeSet::new(),
            purchased_themes: BTreeSet::from([DEFAULT_THEME.to_string()]),
            purchased_power_ups: BTreeMap::new(),
            course_progress: AllCourseProgress::new(),
            total_quizzes_completed: 0,
            total_coins_spent: 0,
            last_challenge_completed: None,
            role: Role::User,
        }
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.contains(id)
    }

    pub fn power_ups(&self, key: &str) -> u32 {
        self.purchased_power_ups.get(key).copied().unwrap_or(0)
    }

    pub fn tense_completed(&self, course_id: &str, tense_id: &str) -> bool {
        self.course_progress
            .get(course_id)
            .and_then(|c| c.get(tense_id))
            .map(|t| t.completed)
            .unwrap_or(false)
    }

    /// Return a copy with `update` applied (used for previews and by in-memory stores)
    pub fn with_update(&self, update: &ProfileUpdate) -> Self {
        let mut next = self.clone();
        update.apply_to(&mut next);
        next
    }
}

/// Partial profile update. Every `Some` field is written, all in one call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_coins: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_themes: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_power_ups: Option<BTreeMap<String, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_progress: Option<AllCourseProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quizzes_completed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_coins_spent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_challenge_completed: Option<DateTime<Utc>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(v) = self.xp {
            profile.xp = v;
        }
        if let Some(v) = self.ai_coins {
            profile.ai_coins = v;
        }
        if let Some(v) = self.streak_days {
            profile.streak_days = v;
        }
        if let Some(v) = self.last_login {
            profile.last_login = Some(v);
        }
        if let Some(v) = &self.active_theme {
            profile.active_theme = v.clone();
        }
        if let Some(v) = &self.achievements {
            profile.achievements = v.clone();
        }
        if let Some(v) = &self.purchased_themes {
            profile.purchased_themes = v.clone();
        }
        if let Some(v) = &self.purchased_power_ups {
            profile.purchased_power_ups = v.clone();
        }
        if let Some(v) = &self.course_progress {
            profile.course_progress = v.clone();
        }
        if let Some(v) = self.total_quizzes_completed {
            profile.total_quizzes_completed = v;
        }
        if let Some(v) = self.total_coins_spent {
            profile.total_coins_spent = v;
        }
        if let Some(v) = self.last_challenge_completed {
            profile.last_challenge_completed = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_owns_default_theme() {
        let p = UserProfile::new("u1", "ada", "ada@example.com");
        assert_eq!(p.active_theme, DEFAULT_THEME);
        assert!(p.purchased_themes.contains(DEFAULT_THEME));
        assert_eq!(p.xp, 0);
    }

    #[test]
    fn test_update_only_touches_set_fields() {
        let p = UserProfile::new("u1", "ada", "ada@example.com");
        let update = ProfileUpdate {
            xp: Some(120),
            ..Default::default()
        };
        let next = p.with_update(&update);
        assert_eq!(next.xp, 120);
        assert_eq!(next.ai_coins, p.ai_coins);
        assert_eq!(next.username, "ada");
    }

    #[test]
    fn test_empty_update() {
        assert!(ProfileUpdate::default().is_empty());
        let u = ProfileUpdate {
            ai_coins: Some(1),
            ..Default::default()
        };
        assert!(!u.is_empty());
    }
}
