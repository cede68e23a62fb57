//! Gauntlet rounds against the in-memory store

mod common;

use std::collections::{BTreeMap, BTreeSet};

use common::store_with_user;
use tense_master::engine::scoring::toggle_word;
use tense_master::engine::submission::{plan_cloze, plan_detective, plan_identification};
use tense_master::engine::{Outcome, RewardTable};
use tense_master::store::{ContentStore, MemoryStore, ProfileStore};
use tense_master::{
    ClozeBlank, ClozeTestChallenge, ErrorAnnotation, GrammarDetectiveChallenge, ProfileUpdate,
    TenseIdentificationChallenge,
};

fn seed_gauntlet(store: &MemoryStore) {
    store
        .insert_detective(GrammarDetectiveChallenge {
            id: "d1".into(),
            paragraph: "Yesterday she go to the market and buyed three apples.".into(),
            errors: vec![
                ErrorAnnotation {
                    incorrect: "go".into(),
                    correct: "went".into(),
                },
                ErrorAnnotation {
                    incorrect: "buyed".into(),
                    correct: "bought".into(),
                },
            ],
        })
        .unwrap();
    store
        .insert_cloze(ClozeTestChallenge {
            id: "c1".into(),
            story_template: "Last summer we ___1___ to Rome. We ___2___ there twice since.".into(),
            blanks: vec![
                ClozeBlank {
                    id: 1,
                    options: vec!["went".into(), "go".into(), "have gone".into()],
                    correct_answer: "went".into(),
                },
                ClozeBlank {
                    id: 2,
                    options: vec!["were".into(), "have been".into(), "are".into()],
                    correct_answer: "have been".into(),
                },
            ],
        })
        .unwrap();
    for (id, sentence, tense) in [
        ("t1", "She has lived here for years.", "Present Perfect"),
        ("t2", "They will be travelling tomorrow.", "Future Continuous"),
    ] {
        store
            .insert_identification(TenseIdentificationChallenge {
                id: id.into(),
                sentence: sentence.into(),
                correct_tense_name: tense.into(),
            })
            .unwrap();
    }
}

#[tokio::test]
async fn test_detective_round_credits_net_score_reward() {
    let (store, mut session) = store_with_user("ada").await;
    seed_gauntlet(&store);
    let xp_before = session.profile.xp;
    let coins_before = session.profile.ai_coins;

    let challenges = store.fetch_detective().await.unwrap();
    let challenge = &challenges[0];
    let mut selected = BTreeSet::new();
    for word in ["go", "buyed", "market"] {
        toggle_word(&mut selected, word);
    }

    let plan = plan_detective(&session.profile, challenge, &selected, &RewardTable::default()).unwrap();
    match &plan.result {
        Outcome::Detective(result) => assert_eq!(result.net_score, 1),
        other => panic!("expected a detective outcome, got {other:?}"),
    }
    assert_eq!(plan.total_reward.xp, 60);
    assert_eq!(plan.total_reward.coins, 30);
    assert!(plan.evaluation.newly.is_empty());

    assert!(session.submit(&store, &plan).await.is_saved());
    let stored = store.fetch_profile(&session.user_id).await.unwrap();
    assert_eq!(stored.xp, xp_before + 60);
    assert_eq!(stored.ai_coins, coins_before + 30);
    assert_eq!(stored.total_quizzes_completed, 0);
}

#[tokio::test]
async fn test_cloze_and_identification_rounds() {
    let (store, mut session) = store_with_user("ada").await;
    seed_gauntlet(&store);
    let xp_before = session.profile.xp;

    let cloze = store.fetch_cloze().await.unwrap();
    let answers = BTreeMap::from([(1, "went".to_string()), (2, "were".to_string())]);
    let plan = plan_cloze(&session.profile, &cloze[0], &answers, &RewardTable::default()).unwrap();
    assert_eq!(plan.total_reward.xp, 75);
    assert!(session.submit(&store, &plan).await.is_saved());

    let rounds = store.fetch_identification().await.unwrap();
    assert_eq!(rounds.len(), 2);
    let answers: Vec<Option<String>> = rounds
        .iter()
        .map(|r| (r.id == "t1").then(|| r.correct_tense_name.clone()))
        .collect();
    let plan = plan_identification(&session.profile, &rounds, &answers, &RewardTable::default()).unwrap();
    assert_eq!(plan.total_reward.xp, 88);
    assert_eq!(plan.total_reward.coins, 50);
    assert!(session.submit(&store, &plan).await.is_saved());

    let stored = store.fetch_profile(&session.user_id).await.unwrap();
    assert_eq!(stored.xp, xp_before + 75 + 88);
}

#[tokio::test]
async fn test_refresh_picks_up_later_write() {
    let (store, mut session) = store_with_user("ada").await;

    // Another device writes after this session read its snapshot; last write wins.
    let update = ProfileUpdate {
        ai_coins: Some(999),
        ..Default::default()
    };
    store.update_profile(&session.user_id, &update).await.unwrap();
    assert_ne!(session.profile.ai_coins, 999);

    session.refresh(&store).await.unwrap();
    assert_eq!(session.profile.ai_coins, 999);
}
