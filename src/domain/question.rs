//! Multiple-choice questions, answer records and quiz results

use serde::{Deserialize, Serialize};

/// A multiple-choice question as served by the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Sentence with a gap, e.g. "She ___ to the store every day."
    pub prompt: String,
    /// Three or four options, including the correct one
    pub options: Vec<String>,
    pub correct_option: String,
}

impl Question {
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }

    /// First option that is not the correct answer
    pub fn first_wrong_option(&self) -> Option<&str> {
        self.options
            .iter()
            .map(String::as_str)
            .find(|o| *o != self.correct_option)
    }
}

/// The user's answer to one question
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_option: Option<String>,
    /// Set by the skip power-up; a skipped question always counts as correct
    #[serde(default)]
    pub skipped: bool,
}

impl AnswerRecord {
    /// Empty answer for a question, as created at quiz start
    pub fn empty(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            selected_option: None,
            skipped: false,
        }
    }

    pub fn answered(question_id: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            selected_option: Some(option.into()),
            skipped: false,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.skipped || self.selected_option.is_some()
    }
}

/// Derived outcome of a scored quiz. Never persisted directly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct QuizResult {
    pub correct_count: u32,
    pub total_count: u32,
    pub answered_count: u32,
    /// Score rounded to the nearest integer (0-100)
    pub score_percent: u32,
    /// Unrounded score; reward formulas and the completion threshold use this
    pub raw_percent: f64,
}

impl QuizResult {
    pub fn from_counts(correct: u32, total: u32, answered: u32) -> Self {
        let raw_percent = if total == 0 {
            0.0
        } else {
            f64::from(correct) * 100.0 / f64::from(total)
        };
        Self {
            correct_count: correct,
            total_count: total,
            answered_count: answered,
            score_percent: raw_percent.round() as u32,
            raw_percent,
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.raw_percent >= 100.0
    }
}
