//! Turning satisfied conditions into newly unlocked achievements

use std::collections::BTreeSet;

use super::checker::{
    check_course_mastery, check_grammar_guru, check_milestone_achievements,
    check_purchase_achievements, check_streak_achievements,
};
use super::definitions::{Achievement, AchievementId};
use crate::domain::{CourseCatalog, UserProfile};
use crate::engine::rewards::Reward;

/// Achievements newly unlocked by one action, with their summed rewards
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// In catalog order
    pub newly: Vec<Achievement>,
    pub total_xp: u64,
    pub total_coins: u64,
}

impl Evaluation {
    pub fn is_empty(&self) -> bool {
        self.newly.is_empty()
    }

    pub fn reward(&self) -> Reward {
        Reward::new(self.total_xp, self.total_coins)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.newly.iter().map(|a| a.id.as_str())
    }
}

/// Resolve candidate ids against `catalog`, dropping held and unknown ones
fn resolve(candidates: BTreeSet<AchievementId>, held: &BTreeSet<String>, catalog: &[Achievement]) -> Evaluation {
    let mut evaluation = Evaluation::default();
    for achievement in catalog {
        if !candidates.contains(&achievement.id) || held.contains(achievement.id.as_str()) {
            continue;
        }
        evaluation.total_xp += achievement.xp_reward;
        evaluation.total_coins += achievement.coin_reward;
        evaluation.newly.push(achievement.clone());
    }
    evaluation
}

/// Evaluate lesson-quiz achievements against the hypothetical post-quiz profile.
///
/// `latest_score` is the unrounded percentage of the quiz just taken.
pub fn evaluate(
    profile: &UserProfile,
    courses: &CourseCatalog,
    catalog: &[Achievement],
    course_id: &str,
    latest_score: f64,
) -> Evaluation {
    let mut candidates: BTreeSet<AchievementId> = BTreeSet::new();
    candidates.extend(check_milestone_achievements(profile.total_quizzes_completed, latest_score));
    candidates.extend(check_streak_achievements(profile.streak_days));
    candidates.extend(check_course_mastery(&profile.course_progress, courses, course_id));
    if check_grammar_guru(&profile.course_progress, courses) {
        candidates.insert(AchievementId::GrammarGuru);
    }

    let evaluation = resolve(candidates, &profile.achievements, catalog);
    if !evaluation.is_empty() {
        tracing::debug!(
            target: "tense_master::engine",
            user_id = %profile.id,
            unlocked = ?evaluation.ids().collect::<Vec<_>>(),
            "Achievements unlocked"
        );
    }
    evaluation
}

/// Evaluate shop achievements against the hypothetical post-purchase profile
pub fn evaluate_purchase(profile: &UserProfile, catalog: &[Achievement]) -> Evaluation {
    let candidates = check_purchase_achievements(profile.total_coins_spent)
        .into_iter()
        .collect();
    resolve(candidates, &profile.achievements, catalog)
}
