//! End-to-end submission flows against the in-memory store

mod common;

use std::collections::BTreeMap;
use std::time::Duration;

use common::{day, simple_past, store_with_user};
use tense_master::engine::shop::plan_purchase;
use tense_master::engine::submission::{plan_daily, plan_lesson};
use tense_master::engine::{DayBoundary, Persisted, QuizSession, RewardTable};
use tense_master::notify::{play, sequence, sequence_submission, MemorySink, Notification};
use tense_master::store::{ContentStore, MemoryStore, ProfileStore};
use tense_master::{
    Course, CourseCatalog, DailyMode, EngineError, PowerUpKind, ProfileUpdate, QuestionSource, Session, Tense,
};

async fn lesson_session(store: &MemoryStore, session: &Session) -> QuizSession {
    let questions = store.fetch_questions(&simple_past()).await.unwrap();
    QuizSession::new(questions, session.profile.purchased_power_ups.clone())
}

#[tokio::test]
async fn test_perfect_first_lesson_persists_rewards_and_achievements() {
    let (store, mut session) = store_with_user("ada").await;
    let mut quiz = lesson_session(&store, &session).await;
    quiz.select("q1", "went").unwrap();
    quiz.select("q2", "saw").unwrap();

    let catalog = store.fetch_catalog().await.unwrap();
    let plan = plan_lesson(&session.profile, &catalog, "past", "simple-past", &quiz, &RewardTable::default()).unwrap();
    assert_eq!(plan.base_reward.xp, 100);
    assert_eq!(plan.base_reward.coins, 50);
    assert_eq!(plan.evaluation.ids().collect::<Vec<_>>(), vec!["first-quiz", "perfect-score"]);

    let persisted = session.submit(&store, &plan).await;
    assert_eq!(persisted, Persisted::Saved);

    let stored = store.fetch_profile(&session.user_id).await.unwrap();
    assert_eq!(stored, session.profile);
    assert_eq!(stored.xp, 250);
    assert_eq!(stored.ai_coins, 110);
    assert_eq!(stored.total_quizzes_completed, 1);
    assert!(stored.tense_completed("past", "simple-past"));
    assert_eq!(stored.course_progress["past"]["simple-past"].score, 100);
}

#[tokio::test]
async fn test_repeat_lesson_does_not_reunlock() {
    let (store, mut session) = store_with_user("ada").await;
    let catalog = store.fetch_catalog().await.unwrap();

    for _ in 0..2 {
        let mut quiz = lesson_session(&store, &session).await;
        quiz.select("q1", "went").unwrap();
        quiz.select("q2", "saw").unwrap();
        let plan =
            plan_lesson(&session.profile, &catalog, "past", "simple-past", &quiz, &RewardTable::default()).unwrap();
        session.submit(&store, &plan).await;
    }

    let stored = store.fetch_profile(&session.user_id).await.unwrap();
    assert_eq!(stored.achievements.len(), 2);
    assert_eq!(stored.xp, 250 + 100);
    assert_eq!(stored.total_quizzes_completed, 2);
}

#[tokio::test]
async fn test_failed_persist_still_returns_result() {
    let (store, mut session) = store_with_user("ada").await;
    let mut quiz = lesson_session(&store, &session).await;
    quiz.select("q1", "went").unwrap();
    quiz.select("q2", "see").unwrap();

    let catalog = store.fetch_catalog().await.unwrap();
    let plan = plan_lesson(&session.profile, &catalog, "past", "simple-past", &quiz, &RewardTable::default()).unwrap();

    store.fail_updates(true);
    let calls_before = store.update_calls();
    let persisted = session.submit(&store, &plan).await;

    assert!(matches!(persisted, Persisted::Failed(_)));
    assert_eq!(store.update_calls(), calls_before + 1);
    assert_eq!(session.profile.xp, 0);
    assert_eq!(plan.total_reward.xp, 50 + 50);

    let schedule = sequence_submission(&plan, &persisted, Duration::from_millis(600));
    assert_eq!(schedule.len(), 1);
    assert!(matches!(schedule[0].notification, Notification::SaveFailed { .. }));

    store.fail_updates(false);
    assert_eq!(store.fetch_profile(&session.user_id).await.unwrap().xp, 0);
}

#[tokio::test]
async fn test_power_ups_deducted_on_submit() {
    let (store, mut session) = store_with_user("ada").await;
    let inventory = BTreeMap::from([("hint".to_string(), 1), ("skip".to_string(), 2)]);
    let update = ProfileUpdate {
        purchased_power_ups: Some(inventory),
        ..Default::default()
    };
    assert!(session.apply(&store, &update).await.is_saved());

    let mut quiz = lesson_session(&store, &session).await;
    quiz.use_power_up(PowerUpKind::Hint, "q1").unwrap();
    assert_eq!(quiz.hint("q1"), Some("went"));
    quiz.select("q1", "went").unwrap();
    quiz.use_power_up(PowerUpKind::Skip, "q2").unwrap();
    assert!(matches!(
        quiz.use_power_up(PowerUpKind::Hint, "q2"),
        Err(EngineError::PowerUpUnavailable(_))
    ));

    let catalog = store.fetch_catalog().await.unwrap();
    let plan = plan_lesson(&session.profile, &catalog, "past", "simple-past", &quiz, &RewardTable::default()).unwrap();
    session.submit(&store, &plan).await;

    let stored = store.fetch_profile(&session.user_id).await.unwrap();
    assert_eq!(stored.power_ups("hint"), 0);
    assert_eq!(stored.power_ups("skip"), 1);
    assert_eq!(stored.course_progress["past"]["simple-past"].score, 100);
}

#[tokio::test]
async fn test_daily_once_per_day() {
    let (store, mut session) = store_with_user("ada").await;
    let questions = vec![common::question("d1", "had written", &["wrote", "writes"])];
    let answers = vec![tense_master::AnswerRecord::answered("d1", "had written")];
    let rewards = RewardTable::default();

    let plan = plan_daily(&session.profile, DailyMode::Hard, &questions, &answers, day(2), DayBoundary::Utc, &rewards)
        .unwrap();
    assert_eq!(plan.total_reward.xp, 250);
    session.submit(&store, &plan).await;

    let again = plan_daily(&session.profile, DailyMode::Hard, &questions, &answers, day(2), DayBoundary::Utc, &rewards);
    assert!(matches!(again, Err(EngineError::DailyAlreadyTaken)));
    assert!(plan_daily(&session.profile, DailyMode::Classic, &questions, &answers, day(3), DayBoundary::Utc, &rewards).is_ok());
}

#[tokio::test]
async fn test_purchase_crossing_threshold_unlocks_high_roller_once() {
    let (store, mut session) = store_with_user("ada").await;
    let update = ProfileUpdate {
        ai_coins: Some(2000),
        total_coins_spent: Some(900),
        ..Default::default()
    };
    session.apply(&store, &update).await;

    let plan = plan_purchase(&session.profile, "theme-ocean").unwrap();
    assert_eq!(plan.evaluation.ids().collect::<Vec<_>>(), vec!["high-roller"]);
    assert!(session.apply(&store, &plan.update).await.is_saved());
    assert_eq!(session.profile.ai_coins, 1750);
    assert_eq!(session.profile.xp, 100);

    let plan = plan_purchase(&session.profile, "theme-mint").unwrap();
    assert!(plan.evaluation.is_empty());

    let stored = store.fetch_profile(&session.user_id).await.unwrap();
    assert!(stored.purchased_themes.contains("theme-ocean"));
    assert!(stored.has_achievement("high-roller"));
}

#[tokio::test(start_paused = true)]
async fn test_notifications_delivered_in_order() {
    let (store, mut session) = store_with_user("ada").await;
    let mut quiz = lesson_session(&store, &session).await;
    quiz.select("q1", "went").unwrap();
    quiz.select("q2", "saw").unwrap();
    let plan = plan_lesson(
        &session.profile,
        &CourseCatalog::builtin(),
        "past",
        "simple-past",
        &quiz,
        &RewardTable::default(),
    )
    .unwrap();
    let persisted = session.submit(&store, &plan).await;

    let sink = MemorySink::default();
    play(&sequence_submission(&plan, &persisted, Duration::from_millis(600)), &sink).await;
    let delivered = sink.delivered();
    assert_eq!(delivered[0], Notification::Gained { xp: 250, coins: 110 });
    assert!(matches!(&delivered[1], Notification::AchievementUnlocked { id, .. } if id == "first-quiz"));
    assert!(matches!(&delivered[2], Notification::AchievementUnlocked { id, .. } if id == "perfect-score"));

    let purchase = sequence(
        Notification::Purchased {
            item: "Hint".into(),
            cost: 50,
        },
        &[],
        &Persisted::Saved,
        Duration::from_millis(600),
    );
    assert_eq!(purchase.len(), 1);
}

#[tokio::test]
async fn test_abandoned_lesson_saves_nothing() {
    let (store, mut session) = store_with_user("ada").await;
    let update = ProfileUpdate {
        purchased_power_ups: Some(BTreeMap::from([("hint".to_string(), 1)])),
        ..Default::default()
    };
    assert!(session.apply(&store, &update).await.is_saved());
    let calls_before = store.update_calls();

    let mut quiz = lesson_session(&store, &session).await;
    quiz.use_power_up(PowerUpKind::Hint, "q1").unwrap();
    quiz.select("q1", "went").unwrap();
    assert!(!quiz.is_complete());

    let catalog = store.fetch_catalog().await.unwrap();
    let planned = plan_lesson(&session.profile, &catalog, "past", "simple-past", &quiz, &RewardTable::default());
    assert!(matches!(planned, Err(EngineError::Incomplete { answered: 1, total: 2 })));

    assert_eq!(store.update_calls(), calls_before);
    let stored = store.fetch_profile(&session.user_id).await.unwrap();
    assert_eq!(stored.power_ups("hint"), 1);
    assert_eq!(stored.total_quizzes_completed, 0);
    assert!(stored.achievements.is_empty());
}

#[tokio::test]
async fn test_custom_course_mastery_unlocks_first_custom_master() {
    let (store, mut session) = store_with_user("ada").await;
    store
        .insert_course(Course {
            id: "phrasal-verbs".into(),
            name: "Phrasal Verbs".into(),
            description: String::new(),
            icon_name: "Sparkles".into(),
            author: Some(session.user_id.clone()),
            builtin: false,
            tenses: vec![Tense::new("get-verbs", "Verbs with get")],
        })
        .unwrap();
    let source = QuestionSource::CustomLesson {
        tense_id: "get-verbs".into(),
    };
    store
        .insert_questions(&source, vec![common::question("g1", "got up", &["got on", "got over"])])
        .unwrap();

    let catalog = store.fetch_catalog().await.unwrap();
    assert!(catalog.get("phrasal-verbs").is_some_and(|c| !c.builtin));

    let mut quiz = QuizSession::new(store.fetch_questions(&source).await.unwrap(), Default::default());
    quiz.select("g1", "got up").unwrap();
    let plan =
        plan_lesson(&session.profile, &catalog, "phrasal-verbs", "get-verbs", &quiz, &RewardTable::default()).unwrap();
    assert_eq!(
        plan.evaluation.ids().collect::<Vec<_>>(),
        vec!["first-quiz", "perfect-score", "first-custom-master"]
    );
    assert_eq!(plan.total_reward.xp, 100 + 50 + 100 + 250);
    assert_eq!(plan.total_reward.coins, 50 + 10 + 50 + 125);

    assert!(session.submit(&store, &plan).await.is_saved());
    let stored = store.fetch_profile(&session.user_id).await.unwrap();
    assert!(stored.has_achievement("first-custom-master"));
    assert!(stored.tense_completed("phrasal-verbs", "get-verbs"));
}
