//! Daily challenge policy: once per calendar day, mode chosen by date

use std::time::{Duration, Instant};

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::domain::DailyMode;
use crate::engine::streaks::DayBoundary;

/// False when the last completion falls on the same calendar day as `now`
pub fn can_take_daily(last_completed: Option<DateTime<Utc>>, now: DateTime<Utc>, boundary: DayBoundary) -> bool {
    match last_completed {
        Some(last) => !boundary.same_day(last, now),
        None => true,
    }
}

/// Time until the next daily challenge unlocks, `None` if available now
pub fn time_until_next(last_completed: Option<DateTime<Utc>>, now: DateTime<Utc>, boundary: DayBoundary) -> Option<chrono::Duration> {
    if can_take_daily(last_completed, now, boundary) {
        return None;
    }
    let tomorrow = boundary.date_of(now).succ_opt()?;
    Some(boundary.start_of(tomorrow)? - now)
}

/// Deterministic daily mode: the same for everyone on a given date
pub fn mode_of_the_day(date: NaiveDate) -> DailyMode {
    let seed = date.year() as f64 * 10000.0 + date.month() as f64 * 100.0 + date.day() as f64;
    let x = seed.sin() * 10000.0;
    let fraction = x - x.floor();
    let idx = (fraction * DailyMode::ALL.len() as f64).floor() as usize;
    DailyMode::ALL[idx.min(DailyMode::ALL.len() - 1)]
}

/// Wall-clock deadline for a time-limited session
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.started.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }
}
