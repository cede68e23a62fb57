//! TOML content packs
//!
//! A pack carries custom courses, multiple-choice questions and gauntlet
//! challenges:
//!
//! ```toml
//! [[course]]
//! id = "phrasal-verbs"
//! name = "Phrasal Verbs"
//! tenses = [{ id = "get-verbs", name = "Verbs with get" }]
//!
//! [[question]]
//! source = "lesson/simple-past"
//! prompt = "She ___ to Paris last year."
//! options = ["went", "goes", "has gone"]
//! answer = "went"
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::domain::{
    ClozeTestChallenge, Course, CourseCatalog, GrammarDetectiveChallenge, Question, QuestionSource,
    TenseIdentificationChallenge, ALL_TENSE_NAMES,
};
use crate::engine::scoring::clean_word;

#[derive(Debug, Clone, Deserialize)]
pub struct PackQuestion {
    /// Generated when omitted
    #[serde(default)]
    pub id: Option<String>,
    /// Storage key, e.g. `lesson/simple-past`, `daily/hard`, `review/past`
    pub source: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentPack {
    #[serde(rename = "course")]
    pub courses: Vec<Course>,
    #[serde(rename = "question")]
    pub questions: Vec<PackQuestion>,
    pub cloze: Vec<ClozeTestChallenge>,
    pub detective: Vec<GrammarDetectiveChallenge>,
    pub identification: Vec<TenseIdentificationChallenge>,
}

/// Rows written by one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub courses: usize,
    pub questions: usize,
    pub cloze: usize,
    pub detective: usize,
    pub identification: usize,
}

impl ContentPack {
    /// Read, parse and validate a pack file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content pack: {}", path.display()))?;
        let mut pack: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse content pack: {}", path.display()))?;
        pack.assign_ids();
        pack.validate()
            .with_context(|| format!("Invalid content pack: {}", path.display()))?;
        Ok(pack)
    }

    fn assign_ids(&mut self) {
        for q in &mut self.questions {
            if q.id.is_none() {
                q.id = Some(uuid::Uuid::new_v4().to_string());
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        for course in &self.courses {
            if CourseCatalog::is_builtin_id(&course.id) {
                bail!("course '{}' reuses a built-in course id", course.id);
            }
            if course.tenses.is_empty() {
                tracing::warn!(target: "tense_master::store", course_id = %course.id, "Course has no tenses");
            }
        }

        for q in &self.questions {
            if QuestionSource::parse_key(&q.source).is_none() {
                bail!("question '{}' has unknown source '{}'", q.prompt, q.source);
            }
            if !(3..=4).contains(&q.options.len()) {
                bail!("question '{}' must have 3 or 4 options", q.prompt);
            }
            if !q.options.contains(&q.answer) {
                bail!("question '{}': answer '{}' is not among the options", q.prompt, q.answer);
            }
        }

        for c in &self.cloze {
            let mut seen = BTreeSet::new();
            let in_story = c.story_blank_ids();
            for blank in &c.blanks {
                if !seen.insert(blank.id) {
                    bail!("cloze '{}': duplicate blank {}", c.id, blank.id);
                }
                if !in_story.contains(&blank.id) {
                    bail!("cloze '{}': blank {} missing from story", c.id, blank.id);
                }
                if !blank.options.contains(&blank.correct_answer) {
                    bail!("cloze '{}': blank {} answer is not among its options", c.id, blank.id);
                }
            }
        }

        for d in &self.detective {
            let words: BTreeSet<String> = d.paragraph.split_whitespace().map(clean_word).collect();
            for e in &d.errors {
                if !words.contains(&e.incorrect) {
                    bail!("detective '{}': '{}' does not appear in the paragraph", d.id, e.incorrect);
                }
            }
        }

        for t in &self.identification {
            if !ALL_TENSE_NAMES.contains(&t.correct_tense_name.as_str()) {
                bail!("identification '{}': unknown tense name '{}'", t.id, t.correct_tense_name);
            }
        }

        Ok(())
    }

    /// Questions paired with their parsed source. Entries that fail to parse are skipped.
    pub fn questions_with_sources(&self) -> impl Iterator<Item = (QuestionSource, Question)> + '_ {
        self.questions.iter().filter_map(|q| {
            let source = QuestionSource::parse_key(&q.source)?;
            let question = Question {
                id: q.id.clone().unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                prompt: q.prompt.clone(),
                options: q.options.clone(),
                correct_option: q.answer.clone(),
            };
            Some((source, question))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK: &str = r#"
        [[course]]
        id = "phrasal"
        name = "Phrasal Verbs"
        tenses = [{ id = "get-verbs", name = "Verbs with get" }]

        [[question]]
        source = "lesson/simple-past"
        prompt = "She ___ home."
        options = ["went", "goes", "gone"]
        answer = "went"

        [[cloze]]
        id = "c1"
        story_template = "It ___1___ all day."
        blanks = [{ id = 1, options = ["rained", "rains"], correct_answer = "rained" }]

        [[detective]]
        id = "d1"
        paragraph = "He go to school."
        errors = [{ incorrect = "go", correct = "goes" }]

        [[identification]]
        id = "t1"
        sentence = "I am eating."
        correct_tense_name = "Present Continuous"
    "#;

    fn parse(s: &str) -> ContentPack {
        let mut pack: ContentPack = toml::from_str(s).unwrap();
        pack.assign_ids();
        pack
    }

    #[test]
    fn test_parse_full_pack() {
        let pack = parse(PACK);
        pack.validate().unwrap();
        assert_eq!(pack.courses.len(), 1);
        assert_eq!(pack.courses[0].icon_name, "BookOpen");
        assert!(pack.questions[0].id.is_some());
        let (source, question) = pack.questions_with_sources().next().unwrap();
        assert_eq!(source.key(), "lesson/simple-past");
        assert_eq!(question.correct_option, "went");
    }

    #[test]
    fn test_rejects_answer_outside_options() {
        let pack = parse(
            r#"
            [[question]]
            source = "daily/hard"
            prompt = "x ___"
            options = ["a", "b", "c"]
            answer = "d"
            "#,
        );
        assert!(pack.validate().is_err());
    }

    #[test]
    fn test_rejects_builtin_course_id() {
        let pack = parse(
            r#"
            [[course]]
            id = "past"
            name = "Mine"
            "#,
        );
        assert!(pack.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_detective_word() {
        let pack = parse(
            r#"
            [[detective]]
            id = "d1"
            paragraph = "All fine here."
            errors = [{ incorrect = "goed", correct = "went" }]
            "#,
        );
        assert!(pack.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.toml");
        std::fs::write(&path, PACK).unwrap();
        let pack = ContentPack::load(&path).unwrap();
        assert_eq!(pack.identification.len(), 1);
    }
}
