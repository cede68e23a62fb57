//! In-memory answering state of a lesson quiz
//!
//! Answers lock once chosen. Power-ups are counted against the inventory
//! snapshot taken at session start and only deducted when the quiz is
//! submitted; an abandoned session costs nothing.

use std::collections::{BTreeMap, HashSet};

use crate::domain::{AnswerRecord, PowerUpKind, Question};
use crate::error::{EngineError, EngineResult};

/// Power-ups used so far in one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerUpUsage {
    pub hint: u32,
    pub fifty_fifty: u32,
    pub skip: u32,
    pub second_chance: u32,
    pub double_xp: u32,
}

impl PowerUpUsage {
    pub fn get(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Hint => self.hint,
            PowerUpKind::FiftyFifty => self.fifty_fifty,
            PowerUpKind::Skip => self.skip,
            PowerUpKind::SecondChance => self.second_chance,
            PowerUpKind::DoubleXp => self.double_xp,
        }
    }

    fn bump(&mut self, kind: PowerUpKind) {
        let slot = match kind {
            PowerUpKind::Hint => &mut self.hint,
            PowerUpKind::FiftyFifty => &mut self.fifty_fifty,
            PowerUpKind::Skip => &mut self.skip,
            PowerUpKind::SecondChance => &mut self.second_chance,
            PowerUpKind::DoubleXp => &mut self.double_xp,
        };
        *slot += 1;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `inventory` minus what was used, never below zero
    pub fn deduct_from(&self, inventory: &BTreeMap<String, u32>) -> BTreeMap<String, u32> {
        let mut remaining = inventory.clone();
        for kind in PowerUpKind::ALL {
            let used = self.get(kind);
            if used == 0 {
                continue;
            }
            let entry = remaining.entry(kind.inventory_key().to_string()).or_insert(0);
            *entry = entry.saturating_sub(used);
        }
        remaining
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<AnswerRecord>,
    locked: HashSet<String>,
    hinted: HashSet<String>,
    narrowed: HashSet<String>,
    inventory: BTreeMap<String, u32>,
    used: PowerUpUsage,
    double_xp: bool,
}

impl QuizSession {
    /// Start a session; `inventory` is the profile's `purchased_power_ups`
    pub fn new(questions: Vec<Question>, inventory: BTreeMap<String, u32>) -> Self {
        let answers = questions.iter().map(|q| AnswerRecord::empty(q.id.clone())).collect();
        Self {
            questions,
            answers,
            locked: HashSet::new(),
            hinted: HashSet::new(),
            narrowed: HashSet::new(),
            inventory,
            used: PowerUpUsage::default(),
            double_xp: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    fn index_of(&self, question_id: &str) -> EngineResult<usize> {
        self.questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or_else(|| EngineError::UnknownQuestion(question_id.to_string()))
    }

    /// Options currently shown for a question (two after 50/50)
    pub fn options(&self, question_id: &str) -> EngineResult<Vec<&str>> {
        let question = &self.questions[self.index_of(question_id)?];
        if self.narrowed.contains(question_id) {
            let mut options = vec![question.correct_option.as_str()];
            options.extend(question.first_wrong_option());
            return Ok(options);
        }
        Ok(question.options.iter().map(String::as_str).collect())
    }

    /// Correct option, once revealed by a hint
    pub fn hint(&self, question_id: &str) -> Option<&str> {
        if !self.hinted.contains(question_id) {
            return None;
        }
        self.questions
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.correct_option.as_str())
    }

    pub fn is_locked(&self, question_id: &str) -> bool {
        self.locked.contains(question_id)
    }

    /// Record an answer. Returns false (and changes nothing) if the question is locked.
    pub fn select(&mut self, question_id: &str, option: &str) -> EngineResult<bool> {
        let idx = self.index_of(question_id)?;
        if self.locked.contains(question_id) {
            return Ok(false);
        }
        self.answers[idx].selected_option = Some(option.to_string());
        self.locked.insert(question_id.to_string());
        Ok(true)
    }

    /// Power-ups of `kind` still available in this session
    pub fn remaining(&self, kind: PowerUpKind) -> u32 {
        let owned = self.inventory.get(kind.inventory_key()).copied().unwrap_or(0);
        owned.saturating_sub(self.used.get(kind))
    }

    /// Spend one power-up. `question_id` is ignored for double XP.
    pub fn use_power_up(&mut self, kind: PowerUpKind, question_id: &str) -> EngineResult<()> {
        if self.remaining(kind) < 1 {
            return Err(EngineError::PowerUpUnavailable(kind.label()));
        }
        if kind == PowerUpKind::DoubleXp {
            self.double_xp = true;
        } else {
            let idx = self.index_of(question_id)?;
            let id = question_id.to_string();
            match kind {
                PowerUpKind::Hint => {
                    self.hinted.insert(id);
                }
                PowerUpKind::FiftyFifty => {
                    self.narrowed.insert(id);
                }
                PowerUpKind::Skip => {
                    self.answers[idx].skipped = true;
                    self.locked.insert(id);
                }
                PowerUpKind::SecondChance => {
                    self.locked.remove(&id);
                }
                PowerUpKind::DoubleXp => {}
            }
        }
        self.used.bump(kind);

        tracing::debug!(
            target: "tense_master::engine",
            power_up = kind.inventory_key(),
            question_id,
            remaining = self.remaining(kind),
            "Power-up used"
        );
        Ok(())
    }

    pub fn double_xp_active(&self) -> bool {
        self.double_xp
    }

    pub fn used(&self) -> PowerUpUsage {
        self.used
    }

    /// Every question answered or skipped
    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(AnswerRecord::is_answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                id: "q1".into(),
                prompt: "She ___ happy.".into(),
                options: vec!["are".into(), "is".into(), "am".into(), "be".into()],
                correct_option: "is".into(),
            },
            Question {
                id: "q2".into(),
                prompt: "They ___ late.".into(),
                options: vec!["were".into(), "was".into(), "is".into()],
                correct_option: "were".into(),
            },
        ]
    }

    fn inventory(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_answers_lock_after_selection() {
        let mut s = QuizSession::new(questions(), BTreeMap::new());
        assert!(s.select("q1", "are").unwrap());
        assert!(!s.select("q1", "is").unwrap());
        assert_eq!(s.answers()[0].selected_option.as_deref(), Some("are"));
    }

    #[test]
    fn test_second_chance_unlocks() {
        let mut s = QuizSession::new(questions(), inventory(&[("second-chance", 1)]));
        s.select("q1", "are").unwrap();
        s.use_power_up(PowerUpKind::SecondChance, "q1").unwrap();
        assert!(s.select("q1", "is").unwrap());
        assert_eq!(s.answers()[0].selected_option.as_deref(), Some("is"));
    }

    #[test]
    fn test_power_up_requires_inventory() {
        let mut s = QuizSession::new(questions(), inventory(&[("hint", 1)]));
        s.use_power_up(PowerUpKind::Hint, "q1").unwrap();
        let err = s.use_power_up(PowerUpKind::Hint, "q2").unwrap_err();
        assert!(matches!(err, EngineError::PowerUpUnavailable(_)));
        assert_eq!(s.used().hint, 1);
        assert!(s.use_power_up(PowerUpKind::Skip, "q1").is_err());
    }

    #[test]
    fn test_unknown_question_costs_nothing() {
        let mut s = QuizSession::new(questions(), inventory(&[("hint", 1)]));
        assert!(s.use_power_up(PowerUpKind::Hint, "nope").is_err());
        assert_eq!(s.remaining(PowerUpKind::Hint), 1);
    }

    #[test]
    fn test_hint_reveals_correct_option() {
        let mut s = QuizSession::new(questions(), inventory(&[("hint", 2)]));
        assert_eq!(s.hint("q1"), None);
        s.use_power_up(PowerUpKind::Hint, "q1").unwrap();
        assert_eq!(s.hint("q1"), Some("is"));
        assert_eq!(s.remaining(PowerUpKind::Hint), 1);
    }

    #[test]
    fn test_fifty_fifty_keeps_correct_and_first_wrong() {
        let mut s = QuizSession::new(questions(), inventory(&[("5050", 1)]));
        s.use_power_up(PowerUpKind::FiftyFifty, "q1").unwrap();
        assert_eq!(s.options("q1").unwrap(), vec!["is", "are"]);
        assert_eq!(s.options("q2").unwrap().len(), 3);
    }

    #[test]
    fn test_skip_marks_and_locks() {
        let mut s = QuizSession::new(questions(), inventory(&[("skip", 1)]));
        s.use_power_up(PowerUpKind::Skip, "q2").unwrap();
        assert!(s.answers()[1].skipped);
        assert!(s.is_locked("q2"));
        assert!(!s.is_complete());
        s.select("q1", "is").unwrap();
        assert!(s.is_complete());
    }

    #[test]
    fn test_double_xp_flag() {
        let mut s = QuizSession::new(questions(), inventory(&[("double-xp", 1)]));
        assert!(!s.double_xp_active());
        s.use_power_up(PowerUpKind::DoubleXp, "").unwrap();
        assert!(s.double_xp_active());
    }

    #[test]
    fn test_deduct_from_current_inventory() {
        let mut s = QuizSession::new(questions(), inventory(&[("hint", 3), ("skip", 2)]));
        s.use_power_up(PowerUpKind::Hint, "q1").unwrap();
        s.use_power_up(PowerUpKind::Hint, "q2").unwrap();
        let after = s.used().deduct_from(&inventory(&[("hint", 1), ("skip", 2)]));
        assert_eq!(after["hint"], 0);
        assert_eq!(after["skip"], 2);
    }
}
