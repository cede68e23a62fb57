//! The signed-in user and their current profile snapshot

use chrono::{DateTime, Utc};

use crate::domain::{ProfileUpdate, UserProfile};
use crate::engine::streaks::{record_login, DayBoundary};
use crate::engine::submission::{Persisted, SubmissionPlan};
use crate::store::{ProfileStore, StoreError, StoreResult};

/// Explicit auth context handed to engine calls
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub profile: UserProfile,
}

impl Session {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            user_id: profile.id.clone(),
            profile,
        }
    }

    /// Look up `username` and record today's login, bumping the streak
    pub async fn login(
        store: &dyn ProfileStore,
        username: &str,
        now: DateTime<Utc>,
        boundary: DayBoundary,
    ) -> StoreResult<Self> {
        let profile = store
            .find_by_username(username)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("user {username}")))?;
        let update = record_login(&profile, now, boundary);
        store.update_profile(&profile.id, &update).await?;

        tracing::info!(
            target: "tense_master::session",
            user_id = %profile.id,
            streak = update.streak_days.unwrap_or(profile.streak_days),
            "Logged in"
        );
        Ok(Self::new(profile.with_update(&update)))
    }

    /// Create a new profile and log it in
    pub async fn register(
        store: &dyn ProfileStore,
        username: &str,
        email: &str,
        now: DateTime<Utc>,
        boundary: DayBoundary,
    ) -> StoreResult<Self> {
        if store.find_by_username(username).await?.is_some() {
            return Err(StoreError::Conflict(format!("username {username}")));
        }
        let profile = UserProfile::new(uuid::Uuid::new_v4().to_string(), username, email);
        store.create_profile(&profile).await?;
        tracing::info!(target: "tense_master::session", user_id = %profile.id, username, "Registered");
        Self::login(store, username, now, boundary).await
    }

    /// Re-read the profile from the store
    pub async fn refresh(&mut self, store: &dyn ProfileStore) -> StoreResult<()> {
        self.profile = store.fetch_profile(&self.user_id).await?;
        Ok(())
    }

    /// Persist a submission and, if saved, fold it into the local snapshot
    pub async fn submit(&mut self, store: &dyn ProfileStore, plan: &SubmissionPlan) -> Persisted {
        let persisted = crate::engine::commit(store, &self.user_id, plan).await;
        if persisted.is_saved() {
            plan.update.apply_to(&mut self.profile);
        }
        persisted
    }

    /// Persist any other partial update (purchases, theme changes)
    pub async fn apply(&mut self, store: &dyn ProfileStore, update: &ProfileUpdate) -> Persisted {
        match store.update_profile(&self.user_id, update).await {
            Ok(()) => {
                update.apply_to(&mut self.profile);
                Persisted::Saved
            }
            Err(e) => {
                tracing::warn!(target: "tense_master::session", user_id = %self.user_id, error = %e, "Failed to save update");
                Persisted::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login_next_day() {
        let store = MemoryStore::new();
        let session = Session::register(&store, "ada", "ada@example.com", at(1), DayBoundary::Utc)
            .await
            .unwrap();
        assert_eq!(session.profile.streak_days, 1);

        let session = Session::login(&store, "ada", at(2), DayBoundary::Utc).await.unwrap();
        assert_eq!(session.profile.streak_days, 2);
        assert_eq!(store.fetch_profile(&session.user_id).await.unwrap().streak_days, 2);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let store = MemoryStore::new();
        let err = Session::login(&store, "nobody", at(1), DayBoundary::Utc).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        Session::register(&store, "ada", "a@x", at(1), DayBoundary::Utc).await.unwrap();
        let err = Session::register(&store, "ada", "b@x", at(1), DayBoundary::Utc).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_failed_apply_keeps_snapshot() {
        let store = MemoryStore::new();
        let mut session = Session::register(&store, "ada", "a@x", at(1), DayBoundary::Utc).await.unwrap();
        store.fail_updates(true);
        let update = ProfileUpdate {
            xp: Some(999),
            ..Default::default()
        };
        let persisted = session.apply(&store, &update).await;
        assert!(!persisted.is_saved());
        assert_eq!(session.profile.xp, 0);
    }
}
