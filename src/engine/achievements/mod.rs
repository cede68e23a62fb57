//! Achievements: static catalog, unlock conditions and evaluation

mod checker;
mod definitions;
mod evaluator;

pub use checker::{HIGH_ROLLER_THRESHOLD, QUIZ_MASTER_THRESHOLD};
pub use definitions::{Achievement, AchievementCategory, AchievementId, ACHIEVEMENTS};
pub use evaluator::{evaluate, evaluate_purchase, Evaluation};
