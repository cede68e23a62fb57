//! Courses, tenses and the combined course catalog

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A grammar lesson unit within a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tense {
    pub id: String,
    pub name: String,
}

impl Tense {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// A named collection of tenses, built-in or user-authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon_name: String,
    /// Author user id for custom courses
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub builtin: bool,
    #[serde(default)]
    pub tenses: Vec<Tense>,
}

fn default_icon() -> String {
    "BookOpen".to_string()
}

impl Course {
    pub fn tense(&self, tense_id: &str) -> Option<&Tense> {
        self.tenses.iter().find(|t| t.id == tense_id)
    }

    /// Tense following `tense_id` in lesson order
    pub fn next_tense(&self, tense_id: &str) -> Option<&Tense> {
        let idx = self.tenses.iter().position(|t| t.id == tense_id)?;
        self.tenses.get(idx + 1)
    }
}

fn builtin(id: &str, name: &str, description: &str, icon: &str, tenses: &[(&str, &str)]) -> Course {
    Course {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon_name: icon.to_string(),
        author: None,
        builtin: true,
        tenses: tenses.iter().map(|(id, name)| Tense::new(id, name)).collect(),
    }
}

static BUILTIN_COURSES: Lazy<Vec<Course>> = Lazy::new(|| {
    vec![
        builtin(
            "present",
            "Present Tenses",
            "Master habits, truths, and ongoing actions in the now.",
            "BookOpen",
            &[
                ("simple-present", "Simple Present"),
                ("present-continuous", "Present Continuous"),
                ("present-perfect", "Present Perfect"),
                ("present-perfect-continuous", "Present Perfect Continuous"),
            ],
        ),
        builtin(
            "past",
            "Past Tenses",
            "Explore actions that have already happened.",
            "History",
            &[
                ("simple-past", "Simple Past"),
                ("past-continuous", "Past Continuous"),
                ("past-perfect", "Past Perfect"),
                ("past-perfect-continuous", "Past Perfect Continuous"),
            ],
        ),
        builtin(
            "future",
            "Future Tenses",
            "Learn to speak about events yet to come.",
            "Rocket",
            &[
                ("simple-future", "Simple Future"),
                ("future-continuous", "Future Continuous"),
                ("future-perfect", "Future Perfect"),
                ("future-perfect-continuous", "Future Perfect Continuous"),
            ],
        ),
        builtin(
            "passive",
            "Passive Voice",
            "Focus on the action, not the actor.",
            "BookCopy",
            &[
                ("passive-present-simple", "Present Simple Passive"),
                ("passive-past-simple", "Past Simple Passive"),
                ("passive-future-simple", "Future Simple Passive"),
            ],
        ),
        builtin(
            "reported-speech",
            "Reported Speech",
            "Understand how to report what others have said.",
            "MessageSquareQuote",
            &[
                ("reported-statements", "Reported Statements"),
                ("reported-questions", "Reported Questions"),
            ],
        ),
    ]
});

/// The static built-in courses, in display order
pub fn builtin_courses() -> &'static [Course] {
    &BUILTIN_COURSES
}

/// Built-in plus custom courses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCatalog {
    pub courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Catalog with only the built-in courses
    pub fn builtin() -> Self {
        Self::new(builtin_courses().to_vec())
    }

    /// Built-in courses followed by `custom`. Custom entries reusing a built-in id are dropped.
    pub fn with_custom(custom: Vec<Course>) -> Self {
        let mut courses = builtin_courses().to_vec();
        for mut course in custom {
            if Self::is_builtin_id(&course.id) {
                tracing::warn!(
                    target: "tense_master::catalog",
                    course_id = %course.id,
                    "Custom course shadows a built-in id; ignoring"
                );
                continue;
            }
            course.builtin = false;
            courses.push(course);
        }
        Self::new(courses)
    }

    pub fn get(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    pub fn is_builtin_id(course_id: &str) -> bool {
        builtin_courses().iter().any(|c| c.id == course_id)
    }

    pub fn custom(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|c| !c.builtin)
    }
}

/// Display glyph for a course icon name. Unknown names fall back to a generic book.
pub fn icon_glyph(icon_name: &str) -> &'static str {
    match icon_name {
        "BookOpen" => "📖",
        "History" => "🕰️",
        "Rocket" => "🚀",
        "BookCopy" => "📚",
        "MessageSquareQuote" => "💬",
        "Sparkles" => "✨",
        "Brain" => "🧠",
        "Globe" => "🌍",
        _ => "📘",
    }
}
