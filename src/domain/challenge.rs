//! Challenge modes and where their questions come from
//!
//! Every playable mode is a variant here and maps to a static [`ModeSpec`].
//! Question storage keys are derived from [`QuestionSource`], never from
//! free-form mode strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Daily challenge flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DailyMode {
    Classic,
    Hard,
    TimeAttack,
}

impl DailyMode {
    pub const ALL: [DailyMode; 3] = [Self::Classic, Self::Hard, Self::TimeAttack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Hard => "hard",
            Self::TimeAttack => "time-attack",
        }
    }
}

impl FromStr for DailyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Self::Classic),
            "hard" => Ok(Self::Hard),
            "time-attack" => Ok(Self::TimeAttack),
            other => Err(format!("unknown daily mode: {other}")),
        }
    }
}

/// Grammar Gauntlet modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GauntletMode {
    Detective,
    Cloze,
    Identification,
}

impl GauntletMode {
    pub const ALL: [GauntletMode; 3] = [Self::Detective, Self::Cloze, Self::Identification];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detective => "detective",
            Self::Cloze => "cloze",
            Self::Identification => "identification",
        }
    }
}

impl FromStr for GauntletMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "detective" => Ok(Self::Detective),
            "cloze" => Ok(Self::Cloze),
            "identification" => Ok(Self::Identification),
            other => Err(format!("unknown gauntlet mode: {other}")),
        }
    }
}

/// Everything a user can play for rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeMode {
    Lesson,
    Daily(DailyMode),
    Review,
    Gauntlet(GauntletMode),
}

impl ChallengeMode {
    pub const ALL: [ChallengeMode; 8] = [
        Self::Lesson,
        Self::Daily(DailyMode::Classic),
        Self::Daily(DailyMode::Hard),
        Self::Daily(DailyMode::TimeAttack),
        Self::Review,
        Self::Gauntlet(GauntletMode::Detective),
        Self::Gauntlet(GauntletMode::Cloze),
        Self::Gauntlet(GauntletMode::Identification),
    ];

    /// Stable key, also used for the `[rewards]` config table
    pub fn key(&self) -> &'static str {
        match self {
            Self::Lesson => "lesson",
            Self::Daily(mode) => mode.as_str(),
            Self::Review => "review",
            Self::Gauntlet(mode) => mode.as_str(),
        }
    }

    pub fn spec(&self) -> &'static ModeSpec {
        match self {
            Self::Lesson => &LESSON,
            Self::Daily(DailyMode::Classic) => &CLASSIC,
            Self::Daily(DailyMode::Hard) => &HARD,
            Self::Daily(DailyMode::TimeAttack) => &TIME_ATTACK,
            Self::Review => &REVIEW,
            Self::Gauntlet(GauntletMode::Detective) => &DETECTIVE,
            Self::Gauntlet(GauntletMode::Cloze) => &CLOZE,
            Self::Gauntlet(GauntletMode::Identification) => &IDENTIFICATION,
        }
    }
}

impl fmt::Display for ChallengeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// Static per-mode configuration
#[derive(Debug)]
pub struct ModeSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Score only the questions actually answered (time-limited modes)
    pub score_answered_only: bool,
}

static LESSON: ModeSpec = ModeSpec {
    name: "Lesson Quiz",
    description: "Ten questions on a single tense.",
    score_answered_only: false,
};
static CLASSIC: ModeSpec = ModeSpec {
    name: "Classic Challenge",
    description: "A balanced mix of questions from all courses.",
    score_answered_only: false,
};
static HARD: ModeSpec = ModeSpec {
    name: "Hard Mode",
    description: "Face trickier distractors and more complex sentences.",
    score_answered_only: false,
};
static TIME_ATTACK: ModeSpec = ModeSpec {
    name: "Time Attack",
    description: "Answer as many questions as you can in one minute.",
    score_answered_only: true,
};
static REVIEW: ModeSpec = ModeSpec {
    name: "Review Quiz",
    description: "Fifteen mixed questions across a whole course.",
    score_answered_only: false,
};
static DETECTIVE: ModeSpec = ModeSpec {
    name: "Grammar Detective",
    description: "Find the mistakes in the text.",
    score_answered_only: false,
};
static CLOZE: ModeSpec = ModeSpec {
    name: "Context is King",
    description: "Fill in the blanks in a story.",
    score_answered_only: false,
};
static IDENTIFICATION: ModeSpec = ModeSpec {
    name: "Rapid Identification",
    description: "Identify the tense, fast!",
    score_answered_only: false,
};

/// Where a multiple-choice question set is read from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionSource {
    /// Questions for a built-in tense
    Lesson { tense_id: String },
    /// Questions authored for a custom course tense
    CustomLesson { tense_id: String },
    Daily(DailyMode),
    /// Mixed review questions for a built-in course
    Review { course_id: String },
}

impl QuestionSource {
    /// Storage key used by the content store
    pub fn key(&self) -> String {
        match self {
            Self::Lesson { tense_id } => format!("lesson/{tense_id}"),
            Self::CustomLesson { tense_id } => format!("custom/{tense_id}"),
            Self::Daily(mode) => format!("daily/{}", mode.as_str()),
            Self::Review { course_id } => format!("review/{course_id}"),
        }
    }

    /// Inverse of [`QuestionSource::key`]
    pub fn parse_key(key: &str) -> Option<Self> {
        let (kind, rest) = key.split_once('/')?;
        if rest.is_empty() {
            return None;
        }
        match kind {
            "lesson" => Some(Self::Lesson {
                tense_id: rest.to_string(),
            }),
            "custom" => Some(Self::CustomLesson {
                tense_id: rest.to_string(),
            }),
            "daily" => rest.parse().ok().map(Self::Daily),
            "review" => Some(Self::Review {
                course_id: rest.to_string(),
            }),
            _ => None,
        }
    }

    pub fn mode(&self) -> ChallengeMode {
        match self {
            Self::Lesson { .. } | Self::CustomLesson { .. } => ChallengeMode::Lesson,
            Self::Daily(mode) => ChallengeMode::Daily(*mode),
            Self::Review { .. } => ChallengeMode::Review,
        }
    }
}
