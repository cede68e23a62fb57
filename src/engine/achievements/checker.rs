//! Achievement checking logic
//!
//! Each function looks at one aspect of a (hypothetical) profile and returns
//! the achievements whose condition holds. Filtering out already-held
//! achievements happens in the evaluator.

use super::definitions::AchievementId;
use crate::domain::{AllCourseProgress, Course, CourseCatalog};

/// Quizzes needed for `quiz-master`
pub const QUIZ_MASTER_THRESHOLD: u32 = 25;

/// Check quiz-count and score achievements
pub fn check_milestone_achievements(total_quizzes: u32, latest_score: f64) -> Vec<AchievementId> {
    let mut satisfied = Vec::new();

    if total_quizzes == 1 {
        satisfied.push(AchievementId::FirstQuiz);
    }
    if latest_score >= 100.0 {
        satisfied.push(AchievementId::PerfectScore);
    }
    if total_quizzes >= QUIZ_MASTER_THRESHOLD {
        satisfied.push(AchievementId::QuizMaster);
    }

    satisfied
}

/// Check login streak achievements
pub fn check_streak_achievements(streak_days: u32) -> Vec<AchievementId> {
    let milestones = [(3, AchievementId::StreakStarter), (7, AchievementId::StreakMaster)];

    milestones
        .into_iter()
        .filter(|(threshold, _)| streak_days >= *threshold)
        .map(|(_, id)| id)
        .collect()
}

fn course_completed(progress: &AllCourseProgress, course: &Course) -> bool {
    !course.tenses.is_empty()
        && course.tenses.iter().all(|t| {
            progress
                .get(&course.id)
                .and_then(|c| c.get(&t.id))
                .is_some_and(|p| p.completed)
        })
}

/// Check mastery for the course just played.
///
/// Built-in courses map to `<course_id>-master`; a built-in course without
/// such an entry yields nothing. Any custom course maps to `first-custom-master`.
pub fn check_course_mastery(
    progress: &AllCourseProgress,
    catalog: &CourseCatalog,
    course_id: &str,
) -> Option<AchievementId> {
    let course = catalog.get(course_id)?;
    if !course_completed(progress, course) {
        return None;
    }
    if CourseCatalog::is_builtin_id(course_id) {
        AchievementId::course_master(course_id)
    } else {
        Some(AchievementId::FirstCustomMaster)
    }
}

/// Every course in the catalog has at least one tense, and all are completed
pub fn check_grammar_guru(progress: &AllCourseProgress, catalog: &CourseCatalog) -> bool {
    !catalog.courses.is_empty() && catalog.courses.iter().all(|c| course_completed(progress, c))
}

/// Coins spent needed for `high-roller`
pub const HIGH_ROLLER_THRESHOLD: u64 = 1000;

/// Check shop achievements (purchase time only)
pub fn check_purchase_achievements(total_coins_spent: u64) -> Vec<AchievementId> {
    if total_coins_spent >= HIGH_ROLLER_THRESHOLD {
        vec![AchievementId::HighRoller]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Tense, TenseProgress};

    fn complete(progress: &mut AllCourseProgress, course: &Course) {
        let entry = progress.entry(course.id.clone()).or_default();
        for t in &course.tenses {
            entry.insert(
                t.id.clone(),
                TenseProgress {
                    completed: true,
                    score: 100,
                },
            );
        }
    }

    fn custom_course(id: &str, tenses: &[&str]) -> Course {
        Course {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            icon_name: "Sparkles".into(),
            author: Some("u1".into()),
            builtin: false,
            tenses: tenses.iter().map(|t| Tense::new(t, t)).collect(),
        }
    }

    #[test]
    fn test_milestones() {
        assert_eq!(
            check_milestone_achievements(1, 100.0),
            vec![AchievementId::FirstQuiz, AchievementId::PerfectScore]
        );
        assert!(check_milestone_achievements(2, 99.9).is_empty());
        assert_eq!(check_milestone_achievements(25, 10.0), vec![AchievementId::QuizMaster]);
    }

    #[test]
    fn test_streaks() {
        assert!(check_streak_achievements(2).is_empty());
        assert_eq!(check_streak_achievements(3), vec![AchievementId::StreakStarter]);
        assert_eq!(
            check_streak_achievements(7),
            vec![AchievementId::StreakStarter, AchievementId::StreakMaster]
        );
    }

    #[test]
    fn test_builtin_course_mastery() {
        let catalog = CourseCatalog::builtin();
        let mut progress = AllCourseProgress::new();
        assert_eq!(check_course_mastery(&progress, &catalog, "passive"), None);
        complete(&mut progress, catalog.get("passive").unwrap());
        assert_eq!(
            check_course_mastery(&progress, &catalog, "passive"),
            Some(AchievementId::PassiveMaster)
        );
    }

    #[test]
    fn test_custom_course_mastery() {
        let course = custom_course("phrasal", &["up", "down"]);
        let catalog = CourseCatalog::with_custom(vec![course.clone()]);
        let mut progress = AllCourseProgress::new();
        complete(&mut progress, &course);
        assert_eq!(
            check_course_mastery(&progress, &catalog, "phrasal"),
            Some(AchievementId::FirstCustomMaster)
        );
    }

    #[test]
    fn test_empty_course_never_mastered() {
        let catalog = CourseCatalog::with_custom(vec![custom_course("empty", &[])]);
        assert_eq!(check_course_mastery(&AllCourseProgress::new(), &catalog, "empty"), None);
    }

    #[test]
    fn test_grammar_guru_requires_every_course() {
        let catalog = CourseCatalog::builtin();
        let mut progress = AllCourseProgress::new();
        for course in catalog.courses.iter().skip(1) {
            complete(&mut progress, course);
        }
        assert!(!check_grammar_guru(&progress, &catalog));
        complete(&mut progress, &catalog.courses[0]);
        assert!(check_grammar_guru(&progress, &catalog));
    }

    #[test]
    fn test_grammar_guru_false_with_empty_course() {
        let catalog = CourseCatalog::with_custom(vec![custom_course("empty", &[])]);
        let mut progress = AllCourseProgress::new();
        for course in &catalog.courses {
            complete(&mut progress, course);
        }
        assert!(!check_grammar_guru(&progress, &catalog));
    }

    #[test]
    fn test_high_roller_threshold() {
        assert!(check_purchase_achievements(999).is_empty());
        assert_eq!(check_purchase_achievements(1000), vec![AchievementId::HighRoller]);
    }
}
