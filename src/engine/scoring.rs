//! Quiz and challenge scoring
//!
//! All functions are pure: ground truth plus the user's answers in, a
//! [`QuizResult`] (or [`DetectiveResult`]) out.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    AnswerRecord, ClozeTestChallenge, GrammarDetectiveChallenge, Question, QuizResult,
    TenseIdentificationChallenge,
};
use crate::error::{EngineError, EngineResult};

/// Punctuation stripped from paragraph words before comparison
const DETECTIVE_PUNCTUATION: &[char] = &['.', ',', '!', '?'];

/// Score a standard quiz. Every question counts towards the total.
pub fn score(questions: &[Question], answers: &[AnswerRecord]) -> EngineResult<QuizResult> {
    let (correct, answered) = tally(questions, answers)?;
    Ok(QuizResult::from_counts(correct, questions.len() as u32, answered))
}

/// Score a time-limited quiz: only questions the user reached count towards the total.
pub fn score_answered(questions: &[Question], answers: &[AnswerRecord]) -> EngineResult<QuizResult> {
    let (correct, answered) = tally(questions, answers)?;
    Ok(QuizResult::from_counts(correct, answered, answered))
}

fn tally(questions: &[Question], answers: &[AnswerRecord]) -> EngineResult<(u32, u32)> {
    if questions.len() != answers.len() {
        return Err(EngineError::AnswerCountMismatch {
            expected: questions.len(),
            actual: answers.len(),
        });
    }

    let mut correct = 0;
    let mut answered = 0;
    for (question, answer) in questions.iter().zip(answers) {
        if answer.is_answered() {
            answered += 1;
        }
        let is_correct = answer.skipped
            || answer
                .selected_option
                .as_deref()
                .is_some_and(|o| question.is_correct(o));
        if is_correct {
            correct += 1;
        }
    }
    Ok((correct, answered))
}

/// Score a cloze story. Unfilled blanks count as wrong.
pub fn score_cloze(challenge: &ClozeTestChallenge, answers: &BTreeMap<u32, String>) -> QuizResult {
    let correct = challenge
        .blanks
        .iter()
        .filter(|b| answers.get(&b.id).is_some_and(|a| *a == b.correct_answer))
        .count() as u32;
    let answered = challenge
        .blanks
        .iter()
        .filter(|b| answers.contains_key(&b.id))
        .count() as u32;
    QuizResult::from_counts(correct, challenge.blanks.len() as u32, answered)
}

/// Score a rapid identification round, answers matched by position
pub fn score_identification(
    challenges: &[TenseIdentificationChallenge],
    answers: &[Option<String>],
) -> EngineResult<QuizResult> {
    if challenges.len() != answers.len() {
        return Err(EngineError::AnswerCountMismatch {
            expected: challenges.len(),
            actual: answers.len(),
        });
    }
    let correct = challenges
        .iter()
        .zip(answers)
        .filter(|(c, a)| a.as_deref() == Some(c.correct_tense_name.as_str()))
        .count() as u32;
    let answered = answers.iter().filter(|a| a.is_some()).count() as u32;
    Ok(QuizResult::from_counts(correct, challenges.len() as u32, answered))
}

/// Outcome of a grammar detective round
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetectiveResult {
    /// Selected words that were planted errors
    pub correct: BTreeSet<String>,
    /// Selected words that were fine
    pub incorrect: BTreeSet<String>,
    /// Planted errors the user did not select
    pub missed: BTreeSet<String>,
    /// `correct - incorrect`, may be negative
    pub net_score: i64,
}

/// Strip sentence punctuation from a paragraph word
pub fn clean_word(word: &str) -> String {
    word.chars().filter(|c| !DETECTIVE_PUNCTUATION.contains(c)).collect()
}

/// Select a word, or deselect it if already selected. Words are stored cleaned.
pub fn toggle_word(selected: &mut BTreeSet<String>, word: &str) {
    let cleaned = clean_word(word);
    if !selected.remove(&cleaned) {
        selected.insert(cleaned);
    }
}

pub fn score_detective(challenge: &GrammarDetectiveChallenge, selected: &BTreeSet<String>) -> DetectiveResult {
    let errors: BTreeSet<String> = challenge.errors.iter().map(|e| e.incorrect.clone()).collect();
    let selected: BTreeSet<String> = selected.iter().map(|w| clean_word(w)).collect();

    let correct: BTreeSet<String> = selected.intersection(&errors).cloned().collect();
    let incorrect: BTreeSet<String> = selected.difference(&errors).cloned().collect();
    let missed: BTreeSet<String> = errors.difference(&selected).cloned().collect();
    let net_score = correct.len() as i64 - incorrect.len() as i64;

    DetectiveResult {
        correct,
        incorrect,
        missed,
        net_score,
    }
}
