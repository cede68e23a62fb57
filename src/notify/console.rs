use async_trait::async_trait;

use super::{Notification, NotificationSink};

/// Prints notifications to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn render(notification: &Notification) -> String {
        match notification {
            Notification::Gained { xp, coins } => format!("+{xp} XP, +{coins} Coins!"),
            Notification::Purchased { item, cost } => format!("Purchased {item} for {cost} coins"),
            Notification::AchievementUnlocked {
                name,
                description,
                icon,
                xp,
                coins,
                ..
            } => {
                let mut line = format!("[{icon}] Achievement unlocked: {name} - {description}");
                if *xp > 0 || *coins > 0 {
                    line.push_str(&format!(" (+{xp} XP, +{coins} Coins)"));
                }
                line
            }
            Notification::SaveFailed { reason } => {
                format!("Could not save your progress: {reason}")
            }
        }
    }
}

#[async_trait]
impl NotificationSink for ConsoleSink {
    async fn deliver(&self, notification: &Notification) {
        println!("{}", Self::render(notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_summary() {
        let text = ConsoleSink::render(&Notification::Gained { xp: 150, coins: 75 });
        assert_eq!(text, "+150 XP, +75 Coins!");
    }

    #[test]
    fn test_render_failure() {
        let text = ConsoleSink::render(&Notification::SaveFailed {
            reason: "offline".into(),
        });
        assert!(text.contains("offline"));
    }
}
