//! Core domain types for Tense Master

mod challenge;
mod course;
mod gauntlet;
mod profile;
mod question;
mod shop;

pub use challenge::{ChallengeMode, DailyMode, GauntletMode, ModeSpec, QuestionSource};
pub use course::{builtin_courses, icon_glyph, Course, CourseCatalog, Tense};
pub use gauntlet::{
    ClozeBlank, ClozeTestChallenge, ErrorAnnotation, GrammarDetectiveChallenge,
    TenseIdentificationChallenge, ALL_TENSE_NAMES,
};
pub use profile::{
    AllCourseProgress, CourseProgress, ProfileUpdate, Role, TenseProgress, UserProfile,
    DEFAULT_THEME,
};
pub use question::{AnswerRecord, Question, QuizResult};
pub use shop::{PowerUpKind, ShopItem, ShopItemKind, SHOP_ITEMS};
