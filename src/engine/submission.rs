//! Turning a finished quiz or challenge into one profile update
//!
//! Every `plan_*` function is pure: it reads a profile snapshot and returns a
//! [`SubmissionPlan`] carrying the merged [`ProfileUpdate`]. [`commit`] is the
//! only step that touches the store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::domain::{
    AnswerRecord, ChallengeMode, ClozeTestChallenge, CourseCatalog, DailyMode, GauntletMode,
    GrammarDetectiveChallenge, ProfileUpdate, Question, QuizResult, TenseIdentificationChallenge,
    UserProfile,
};
use crate::engine::achievements::{evaluate, Evaluation, ACHIEVEMENTS};
use crate::engine::daily::can_take_daily;
use crate::engine::progress::merge_progress;
use crate::engine::quiz_session::QuizSession;
use crate::engine::rewards::{compute_reward, Modifiers, Performance, Reward, RewardTable};
use crate::engine::scoring::{
    score, score_answered, score_cloze, score_detective, score_identification, DetectiveResult,
};
use crate::engine::streaks::DayBoundary;
use crate::error::{EngineError, EngineResult};
use crate::store::ProfileStore;

/// What was scored
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Quiz(QuizResult),
    Detective(DetectiveResult),
}

impl Outcome {
    /// Score shown to the user: rounded percentage, or net score for detective
    pub fn headline(&self) -> String {
        match self {
            Self::Quiz(r) => format!("{}%", r.score_percent),
            Self::Detective(r) => format!("net {}", r.net_score),
        }
    }
}

/// Everything computed for one submission
#[derive(Debug, Clone)]
pub struct SubmissionPlan {
    pub mode: ChallengeMode,
    pub result: Outcome,
    /// Mode reward including the double-XP modifier
    pub base_reward: Reward,
    pub evaluation: Evaluation,
    /// `base_reward` plus achievement rewards
    pub total_reward: Reward,
    pub update: ProfileUpdate,
}

/// Result of the single persistence attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    Saved,
    Failed(String),
}

impl Persisted {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Reject a quiz with unanswered questions
fn ensure_complete(answers: &[AnswerRecord]) -> EngineResult<()> {
    let answered = answers.iter().filter(|a| a.is_answered()).count();
    if answered < answers.len() {
        return Err(EngineError::Incomplete {
            answered,
            total: answers.len(),
        });
    }
    Ok(())
}

/// Plan that credits `base_reward` and nothing else
fn reward_only(profile: &UserProfile, mode: ChallengeMode, result: Outcome, base_reward: Reward) -> SubmissionPlan {
    SubmissionPlan {
        mode,
        result,
        base_reward,
        evaluation: Evaluation::default(),
        total_reward: base_reward,
        update: ProfileUpdate {
            xp: Some(profile.xp + base_reward.xp),
            ai_coins: Some(profile.ai_coins + base_reward.coins),
            ..Default::default()
        },
    }
}

/// Lesson quiz: rewards, progress, power-up deduction and achievements
pub fn plan_lesson(
    profile: &UserProfile,
    catalog: &CourseCatalog,
    course_id: &str,
    tense_id: &str,
    session: &QuizSession,
    rewards: &RewardTable,
) -> EngineResult<SubmissionPlan> {
    let course = catalog
        .get(course_id)
        .ok_or_else(|| EngineError::UnknownCourse(course_id.to_string()))?;
    if course.tense(tense_id).is_none() {
        return Err(EngineError::UnknownTense {
            course_id: course_id.to_string(),
            tense_id: tense_id.to_string(),
        });
    }
    if session.questions().is_empty() {
        return Err(EngineError::NoQuestions(format!("{course_id}/{tense_id}")));
    }
    ensure_complete(session.answers())?;

    let result = score(session.questions(), session.answers())?;
    let modifiers = Modifiers {
        double_xp: session.double_xp_active(),
    };
    let base_reward = compute_reward(
        rewards,
        ChallengeMode::Lesson,
        Performance::Percent(result.raw_percent),
        modifiers,
    );

    let course_progress = merge_progress(&profile.course_progress, course_id, tense_id, result.raw_percent);
    let total_quizzes_completed = profile.total_quizzes_completed + 1;

    let mut hypothetical = profile.clone();
    hypothetical.course_progress = course_progress.clone();
    hypothetical.total_quizzes_completed = total_quizzes_completed;
    let evaluation = evaluate(&hypothetical, catalog, ACHIEVEMENTS, course_id, result.raw_percent);

    let total_reward = base_reward + evaluation.reward();
    let mut achievements = profile.achievements.clone();
    achievements.extend(evaluation.ids().map(String::from));

    let update = ProfileUpdate {
        xp: Some(profile.xp + total_reward.xp),
        ai_coins: Some(profile.ai_coins + total_reward.coins),
        course_progress: Some(course_progress),
        purchased_power_ups: Some(session.used().deduct_from(&profile.purchased_power_ups)),
        achievements: Some(achievements),
        total_quizzes_completed: Some(total_quizzes_completed),
        ..Default::default()
    };

    tracing::info!(
        target: "tense_master::engine",
        user_id = %profile.id,
        course_id,
        tense_id,
        score = result.score_percent,
        xp = total_reward.xp,
        coins = total_reward.coins,
        unlocked = evaluation.newly.len(),
        "Lesson quiz planned"
    );

    Ok(SubmissionPlan {
        mode: ChallengeMode::Lesson,
        result: Outcome::Quiz(result),
        base_reward,
        evaluation,
        total_reward,
        update,
    })
}

/// Daily challenge: once per day, stamps `last_challenge_completed`
pub fn plan_daily(
    profile: &UserProfile,
    mode: DailyMode,
    questions: &[Question],
    answers: &[AnswerRecord],
    now: DateTime<Utc>,
    boundary: DayBoundary,
    rewards: &RewardTable,
) -> EngineResult<SubmissionPlan> {
    if !can_take_daily(profile.last_challenge_completed, now, boundary) {
        return Err(EngineError::DailyAlreadyTaken);
    }
    if questions.is_empty() {
        return Err(EngineError::NoQuestions(format!("daily/{}", mode.as_str())));
    }

    let challenge = ChallengeMode::Daily(mode);
    let result = if challenge.spec().score_answered_only {
        score_answered(questions, answers)?
    } else {
        ensure_complete(answers)?;
        score(questions, answers)?
    };
    let base_reward = compute_reward(
        rewards,
        challenge,
        Performance::Percent(result.raw_percent),
        Modifiers::default(),
    );

    let mut plan = reward_only(profile, challenge, Outcome::Quiz(result), base_reward);
    plan.update.last_challenge_completed = Some(now);

    tracing::info!(
        target: "tense_master::engine",
        user_id = %profile.id,
        mode = mode.as_str(),
        score = result.score_percent,
        answered = result.answered_count,
        "Daily challenge planned"
    );
    Ok(plan)
}

/// Course review quiz
pub fn plan_review(
    profile: &UserProfile,
    course_id: &str,
    questions: &[Question],
    answers: &[AnswerRecord],
    rewards: &RewardTable,
) -> EngineResult<SubmissionPlan> {
    if questions.is_empty() {
        return Err(EngineError::NoQuestions(format!("review/{course_id}")));
    }
    ensure_complete(answers)?;
    let result = score(questions, answers)?;
    let base_reward = compute_reward(
        rewards,
        ChallengeMode::Review,
        Performance::Percent(result.raw_percent),
        Modifiers::default(),
    );
    Ok(reward_only(profile, ChallengeMode::Review, Outcome::Quiz(result), base_reward))
}

pub fn plan_cloze(
    profile: &UserProfile,
    challenge: &ClozeTestChallenge,
    answers: &BTreeMap<u32, String>,
    rewards: &RewardTable,
) -> EngineResult<SubmissionPlan> {
    if challenge.blanks.is_empty() {
        return Err(EngineError::NoQuestions(format!("cloze/{}", challenge.id)));
    }
    let mode = ChallengeMode::Gauntlet(GauntletMode::Cloze);
    let result = score_cloze(challenge, answers);
    let base_reward = compute_reward(rewards, mode, Performance::Percent(result.raw_percent), Modifiers::default());
    Ok(reward_only(profile, mode, Outcome::Quiz(result), base_reward))
}

pub fn plan_identification(
    profile: &UserProfile,
    challenges: &[TenseIdentificationChallenge],
    answers: &[Option<String>],
    rewards: &RewardTable,
) -> EngineResult<SubmissionPlan> {
    if challenges.is_empty() {
        return Err(EngineError::NoQuestions("identification".to_string()));
    }
    let mode = ChallengeMode::Gauntlet(GauntletMode::Identification);
    let result = score_identification(challenges, answers)?;
    let base_reward = compute_reward(rewards, mode, Performance::Percent(result.raw_percent), Modifiers::default());
    Ok(reward_only(profile, mode, Outcome::Quiz(result), base_reward))
}

pub fn plan_detective(
    profile: &UserProfile,
    challenge: &GrammarDetectiveChallenge,
    selected: &BTreeSet<String>,
    rewards: &RewardTable,
) -> EngineResult<SubmissionPlan> {
    let mode = ChallengeMode::Gauntlet(GauntletMode::Detective);
    let result = score_detective(challenge, selected);
    let base_reward = compute_reward(rewards, mode, Performance::Net(result.net_score), Modifiers::default());
    Ok(reward_only(profile, mode, Outcome::Detective(result), base_reward))
}

/// Persist a plan with a single update call. Failures are reported, not retried.
pub async fn commit(store: &dyn ProfileStore, user_id: &str, plan: &SubmissionPlan) -> Persisted {
    match store.update_profile(user_id, &plan.update).await {
        Ok(()) => {
            tracing::debug!(target: "tense_master::engine", user_id, mode = plan.mode.key(), "Submission saved");
            Persisted::Saved
        }
        Err(e) => {
            tracing::warn!(
                target: "tense_master::engine",
                user_id,
                mode = plan.mode.key(),
                error = %e,
                "Failed to save submission"
            );
            Persisted::Failed(e.to_string())
        }
    }
}
