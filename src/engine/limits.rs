//! Question counts and time limits per mode (the `[quiz]` config section)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DailyMode, QuestionSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizLimits {
    pub lesson_questions: usize,
    pub review_questions: usize,
    pub daily_questions: usize,
    pub time_attack_questions: usize,
    pub time_attack_seconds: u64,
    pub identification_questions: usize,
}

impl Default for QuizLimits {
    fn default() -> Self {
        Self {
            lesson_questions: 10,
            review_questions: 15,
            daily_questions: 10,
            time_attack_questions: 20,
            time_attack_seconds: 60,
            identification_questions: 10,
        }
    }
}

impl QuizLimits {
    /// Number of questions drawn for a session from `source`
    pub fn question_limit(&self, source: &QuestionSource) -> usize {
        match source {
            QuestionSource::Lesson { .. } | QuestionSource::CustomLesson { .. } => self.lesson_questions,
            QuestionSource::Review { .. } => self.review_questions,
            QuestionSource::Daily(DailyMode::TimeAttack) => self.time_attack_questions,
            QuestionSource::Daily(_) => self.daily_questions,
        }
    }

    /// Time limit, for modes that have one
    pub fn time_limit(&self, source: &QuestionSource) -> Option<Duration> {
        match source {
            QuestionSource::Daily(DailyMode::TimeAttack) => Some(Duration::from_secs(self.time_attack_seconds)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = QuizLimits::default();
        let lesson = QuestionSource::Lesson {
            tense_id: "simple-past".into(),
        };
        assert_eq!(limits.question_limit(&lesson), 10);
        assert_eq!(limits.question_limit(&QuestionSource::Daily(DailyMode::Hard)), 10);
        assert_eq!(limits.question_limit(&QuestionSource::Daily(DailyMode::TimeAttack)), 20);
        assert_eq!(
            limits.question_limit(&QuestionSource::Review {
                course_id: "past".into()
            }),
            15
        );
        assert_eq!(
            limits.time_limit(&QuestionSource::Daily(DailyMode::TimeAttack)),
            Some(Duration::from_secs(60))
        );
        assert_eq!(limits.time_limit(&lesson), None);
    }
}
