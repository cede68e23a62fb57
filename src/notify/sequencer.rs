//! Ordering and timing of post-submission notifications

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::engine::achievements::Achievement;
use crate::engine::submission::{Persisted, SubmissionPlan};
use crate::engine::Reward;

/// Default gap between consecutive achievement notifications
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notification {
    /// XP and coins credited by a submission
    Gained { xp: u64, coins: u64 },
    /// A shop purchase went through
    Purchased { item: String, cost: u64 },
    AchievementUnlocked {
        id: String,
        name: String,
        description: String,
        icon: String,
        xp: u64,
        coins: u64,
    },
    /// The single persistence attempt failed
    SaveFailed { reason: String },
}

impl Notification {
    pub fn gained(reward: Reward) -> Self {
        Self::Gained {
            xp: reward.xp,
            coins: reward.coins,
        }
    }

    pub fn unlocked(achievement: &Achievement) -> Self {
        Self::AchievementUnlocked {
            id: achievement.id.as_str().to_string(),
            name: achievement.name.to_string(),
            description: achievement.description.to_string(),
            icon: achievement.icon.to_string(),
            xp: achievement.xp_reward,
            coins: achievement.coin_reward,
        }
    }
}

/// A notification and its offset from the start of playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    pub at: Duration,
    pub notification: Notification,
}

/// Summary right away, then achievement `i` at `i * interval`.
///
/// A failed save replaces all of it with one `SaveFailed`.
pub fn sequence(
    summary: Notification,
    achievements: &[Achievement],
    persisted: &Persisted,
    interval: Duration,
) -> Vec<Scheduled> {
    if let Persisted::Failed(reason) = persisted {
        return vec![Scheduled {
            at: Duration::ZERO,
            notification: Notification::SaveFailed {
                reason: reason.clone(),
            },
        }];
    }

    let mut schedule = Vec::with_capacity(achievements.len() + 1);
    schedule.push(Scheduled {
        at: Duration::ZERO,
        notification: summary,
    });
    for (i, achievement) in achievements.iter().enumerate() {
        schedule.push(Scheduled {
            at: interval * i as u32,
            notification: Notification::unlocked(achievement),
        });
    }
    schedule
}

/// Schedule for a quiz or challenge submission
pub fn sequence_submission(plan: &SubmissionPlan, persisted: &Persisted, interval: Duration) -> Vec<Scheduled> {
    sequence(
        Notification::gained(plan.total_reward),
        &plan.evaluation.newly,
        persisted,
        interval,
    )
}

/// Receives notifications as they become due
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification);
}

/// Deliver `schedule` to `sink`, sleeping until each entry is due
pub async fn play(schedule: &[Scheduled], sink: &dyn NotificationSink) {
    let start = tokio::time::Instant::now();
    for entry in schedule {
        tokio::time::sleep_until(start + entry.at).await;
        sink.deliver(&entry.notification).await;
    }
}
