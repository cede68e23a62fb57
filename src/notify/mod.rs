//! Toast-style notifications shown after a submission or purchase

mod console;
mod sequencer;

use std::sync::Mutex;

use async_trait::async_trait;

pub use console::ConsoleSink;
pub use sequencer::{
    play, sequence, sequence_submission, Notification, NotificationSink, Scheduled, DEFAULT_STAGGER,
};

/// Collects delivered notifications in order
#[derive(Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn deliver(&self, notification: &Notification) {
        if let Ok(mut delivered) = self.delivered.lock() {
            delivered.push(notification.clone());
        }
    }
}
