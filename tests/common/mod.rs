//! Shared test utilities for engine and store integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use tense_master::engine::DayBoundary;
use tense_master::store::MemoryStore;
use tense_master::{Question, QuestionSource, Session};

pub fn question(id: &str, correct: &str, wrong: &[&str]) -> Question {
    let mut options = vec![correct.to_string()];
    options.extend(wrong.iter().map(|w| w.to_string()));
    Question {
        id: id.to_string(),
        prompt: format!("{id}: ___"),
        options,
        correct_option: correct.to_string(),
    }
}

/// 09:00 UTC on the given day of March 2026
pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, 9, 0, 0).unwrap()
}

pub fn simple_past() -> QuestionSource {
    QuestionSource::Lesson {
        tense_id: "simple-past".to_string(),
    }
}

/// Memory store with two simple-past questions and one registered user
pub async fn store_with_user(username: &str) -> (MemoryStore, Session) {
    let store = MemoryStore::new();
    store
        .insert_questions(
            &simple_past(),
            vec![
                question("q1", "went", &["go", "gone"]),
                question("q2", "saw", &["see", "seen"]),
            ],
        )
        .expect("Failed to seed questions");

    let session = Session::register(&store, username, &format!("{username}@example.com"), day(1), DayBoundary::Utc)
        .await
        .expect("Failed to register user");
    (store, session)
}
