//! In-memory store used by tests and dry runs

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{lock, ContentStore, ProfileStore, StoreError, StoreResult};
use crate::domain::{
    ClozeTestChallenge, Course, CourseCatalog, GrammarDetectiveChallenge, ProfileUpdate, Question,
    QuestionSource, TenseIdentificationChallenge, UserProfile,
};
use crate::engine::Standing;

#[derive(Default)]
struct Content {
    questions: HashMap<String, Vec<Question>>,
    courses: Vec<Course>,
    cloze: Vec<ClozeTestChallenge>,
    detective: Vec<GrammarDetectiveChallenge>,
    identification: Vec<TenseIdentificationChallenge>,
}

#[derive(Default)]
pub struct MemoryStore {
    profiles: Mutex<HashMap<String, UserProfile>>,
    content: Mutex<Content>,
    fail_updates: AtomicBool,
    update_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `update_profile` call fail
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of `update_profile` calls so far, failed ones included
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn insert_questions(&self, source: &QuestionSource, questions: Vec<Question>) -> StoreResult<()> {
        lock(&self.content)?
            .questions
            .entry(source.key())
            .or_default()
            .extend(questions);
        Ok(())
    }

    pub fn insert_course(&self, course: Course) -> StoreResult<()> {
        lock(&self.content)?.courses.push(course);
        Ok(())
    }

    pub fn insert_cloze(&self, challenge: ClozeTestChallenge) -> StoreResult<()> {
        lock(&self.content)?.cloze.push(challenge);
        Ok(())
    }

    pub fn insert_detective(&self, challenge: GrammarDetectiveChallenge) -> StoreResult<()> {
        lock(&self.content)?.detective.push(challenge);
        Ok(())
    }

    pub fn insert_identification(&self, challenge: TenseIdentificationChallenge) -> StoreResult<()> {
        lock(&self.content)?.identification.push(challenge);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn fetch_profile(&self, user_id: &str) -> StoreResult<UserProfile> {
        lock(&self.profiles)?
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("profile {user_id}")))
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserProfile>> {
        Ok(lock(&self.profiles)?
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn create_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        lock(&self.profiles)?.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> StoreResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated write failure".to_string()));
        }
        let mut profiles = lock(&self.profiles)?;
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {user_id}")))?;
        update.apply_to(profile);
        Ok(())
    }

    async fn leaderboard(&self) -> StoreResult<Vec<Standing>> {
        Ok(lock(&self.profiles)?
            .values()
            .map(|p| Standing {
                user_id: p.id.clone(),
                username: p.username.clone(),
                xp: p.xp,
            })
            .collect())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn fetch_questions(&self, source: &QuestionSource) -> StoreResult<Vec<Question>> {
        Ok(lock(&self.content)?
            .questions
            .get(&source.key())
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_catalog(&self) -> StoreResult<CourseCatalog> {
        Ok(CourseCatalog::with_custom(lock(&self.content)?.courses.clone()))
    }

    async fn fetch_cloze(&self) -> StoreResult<Vec<ClozeTestChallenge>> {
        Ok(lock(&self.content)?.cloze.clone())
    }

    async fn fetch_detective(&self) -> StoreResult<Vec<GrammarDetectiveChallenge>> {
        Ok(lock(&self.content)?.detective.clone())
    }

    async fn fetch_identification(&self) -> StoreResult<Vec<TenseIdentificationChallenge>> {
        Ok(lock(&self.content)?.identification.clone())
    }
}
