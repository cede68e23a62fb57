//! Login streak tracking
//!
//! A streak counts consecutive calendar days with at least one login. Which
//! calendar is used is a [`DayBoundary`] policy.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ProfileUpdate, UserProfile};

/// Where one calendar day ends and the next begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayBoundary {
    #[default]
    Utc,
    /// The machine's local timezone
    Local,
    /// Fixed offset from UTC in minutes, e.g. `+120` or `-300`
    Offset(i32),
}

impl DayBoundary {
    /// Calendar date of `instant` under this policy
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Utc => instant.date_naive(),
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Offset(minutes) => match FixedOffset::east_opt(minutes * 60) {
                Some(offset) => instant.with_timezone(&offset).date_naive(),
                None => instant.date_naive(),
            },
        }
    }

    /// First instant of `date` under this policy
    pub fn start_of(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        match self {
            Self::Utc => Some(midnight.and_utc()),
            Self::Local => Local
                .from_local_datetime(&midnight)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
            Self::Offset(minutes) => {
                let offset = FixedOffset::east_opt(minutes * 60)?;
                offset
                    .from_local_datetime(&midnight)
                    .single()
                    .map(|t| t.with_timezone(&Utc))
            }
        }
    }

    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.date_of(a) == self.date_of(b)
    }
}

impl TryFrom<String> for DayBoundary {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            other => {
                let minutes: i32 = other
                    .parse()
                    .map_err(|_| format!("invalid day boundary '{other}': expected utc, local or minutes offset"))?;
                if minutes.abs() >= 24 * 60 {
                    return Err(format!("day boundary offset out of range: {minutes}"));
                }
                Ok(Self::Offset(minutes))
            }
        }
    }
}

impl From<DayBoundary> for String {
    fn from(value: DayBoundary) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("utc"),
            Self::Local => f.write_str("local"),
            Self::Offset(minutes) => write!(f, "{minutes:+}"),
        }
    }
}

/// New streak value for a login at `now`
pub fn update_streak(
    current: u32,
    last_login: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    boundary: DayBoundary,
) -> u32 {
    let Some(last) = last_login else {
        return 1;
    };

    let today = boundary.date_of(now);
    let last_day = boundary.date_of(last);
    let days_since = (today - last_day).num_days();

    match days_since {
        // Same day, or a last login in the future
        d if d <= 0 => current,
        1 => current.saturating_add(1),
        _ => 1,
    }
}

/// Profile update for a login at `now`
pub fn record_login(profile: &UserProfile, now: DateTime<Utc>, boundary: DayBoundary) -> ProfileUpdate {
    let streak = update_streak(profile.streak_days, profile.last_login, now, boundary);
    if streak != profile.streak_days {
        tracing::debug!(
            target: "tense_master::engine",
            user_id = %profile.id,
            from = profile.streak_days,
            to = streak,
            "Login streak updated"
        );
    }
    ProfileUpdate {
        streak_days: Some(streak),
        last_login: Some(now),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_first_login_starts_streak() {
        assert_eq!(update_streak(0, None, at(2024, 3, 1, 9), DayBoundary::Utc), 1);
    }

    #[test]
    fn test_same_day_unchanged() {
        let s = update_streak(4, Some(at(2024, 3, 1, 1)), at(2024, 3, 1, 23), DayBoundary::Utc);
        assert_eq!(s, 4);
    }

    #[test]
    fn test_next_day_extends() {
        let s = update_streak(4, Some(at(2024, 3, 1, 23)), at(2024, 3, 2, 0), DayBoundary::Utc);
        assert_eq!(s, 5);
    }

    #[test]
    fn test_gap_resets() {
        let s = update_streak(9, Some(at(2024, 3, 1, 12)), at(2024, 3, 3, 12), DayBoundary::Utc);
        assert_eq!(s, 1);
    }

    #[test]
    fn test_future_last_login_keeps_streak() {
        let s = update_streak(3, Some(at(2024, 3, 5, 12)), at(2024, 3, 3, 12), DayBoundary::Utc);
        assert_eq!(s, 3);
    }

    #[test]
    fn test_offset_boundary_changes_day() {
        // 23:00 UTC and 01:00 UTC next day are the same day at UTC-3
        let boundary = DayBoundary::Offset(-180);
        assert!(boundary.same_day(at(2024, 3, 1, 23), at(2024, 3, 2, 1)));
        assert!(!DayBoundary::Utc.same_day(at(2024, 3, 1, 23), at(2024, 3, 2, 1)));
    }

    #[test]
    fn test_parse_boundary() {
        assert_eq!(DayBoundary::try_from("local".to_string()).unwrap(), DayBoundary::Local);
        assert_eq!(DayBoundary::try_from("+120".to_string()).unwrap(), DayBoundary::Offset(120));
        assert_eq!(DayBoundary::try_from("-300".to_string()).unwrap(), DayBoundary::Offset(-300));
        assert!(DayBoundary::try_from("mars".to_string()).is_err());
        assert!(DayBoundary::try_from("1440".to_string()).is_err());
        assert_eq!(DayBoundary::Offset(120).to_string(), "+120");
    }

    #[test]
    fn test_record_login_sets_both_fields() {
        let mut profile = UserProfile::new("u1", "ada", "ada@example.com");
        profile.streak_days = 2;
        profile.last_login = Some(at(2024, 3, 1, 8));
        let update = record_login(&profile, at(2024, 3, 2, 8), DayBoundary::Utc);
        assert_eq!(update.streak_days, Some(3));
        assert_eq!(update.last_login, Some(at(2024, 3, 2, 8)));
    }
}
