//! Gauntlet challenge content: error spotting, cloze stories, tense identification

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Every tense name offered as an option in rapid identification
pub const ALL_TENSE_NAMES: &[&str] = &[
    "Simple Present",
    "Present Continuous",
    "Present Perfect",
    "Present Perfect Continuous",
    "Simple Past",
    "Past Continuous",
    "Past Perfect",
    "Past Perfect Continuous",
    "Simple Future",
    "Future Continuous",
    "Future Perfect",
    "Future Perfect Continuous",
    "Present Simple Passive",
    "Past Simple Passive",
    "Future Simple Passive",
    "Reported Statements",
    "Reported Questions",
];

/// One planted mistake in a detective paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAnnotation {
    pub incorrect: String,
    pub correct: String,
}

/// "Grammar Detective": find the wrong words in a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarDetectiveChallenge {
    pub id: String,
    pub paragraph: String,
    pub errors: Vec<ErrorAnnotation>,
}

/// One gap in a cloze story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClozeBlank {
    pub id: u32,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// "Context is King": a story with numbered blanks written as `___N___`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClozeTestChallenge {
    pub id: String,
    pub story_template: String,
    pub blanks: Vec<ClozeBlank>,
}

static BLANK_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"___(\d+)___").expect("blank marker pattern is valid"));

impl ClozeTestChallenge {
    pub fn blank(&self, id: u32) -> Option<&ClozeBlank> {
        self.blanks.iter().find(|b| b.id == id)
    }

    /// Blank ids in the order their markers appear in the story
    pub fn story_blank_ids(&self) -> Vec<u32> {
        BLANK_MARKER
            .captures_iter(&self.story_template)
            .filter_map(|c| c[1].parse().ok())
            .collect()
    }

    /// Story with every `___N___` marker replaced by `fill(N)`
    pub fn render(&self, fill: impl Fn(u32) -> String) -> String {
        BLANK_MARKER
            .replace_all(&self.story_template, |c: &Captures| match c[1].parse() {
                Ok(id) => fill(id),
                Err(_) => c[0].to_string(),
            })
            .into_owned()
    }
}

/// "Rapid Identification": name the tense of a sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenseIdentificationChallenge {
    pub id: String,
    pub sentence: String,
    pub correct_tense_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story() -> ClozeTestChallenge {
        ClozeTestChallenge {
            id: "c1".into(),
            story_template: "Yesterday I ___2___ late because it ___1___.".into(),
            blanks: vec![],
        }
    }

    #[test]
    fn test_story_blank_ids_in_order() {
        assert_eq!(story().story_blank_ids(), vec![2, 1]);
    }

    #[test]
    fn test_render_fills_markers() {
        let text = story().render(|id| format!("[{id}]"));
        assert_eq!(text, "Yesterday I [2] late because it [1].");
    }
}
