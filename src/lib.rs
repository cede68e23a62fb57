//! Tense Master - gamified English grammar practice
//!
//! Learners take lesson quizzes per tense, course reviews, a once-a-day
//! challenge and the Grammar Gauntlet mini-games. Every finished attempt is
//! scored, rewarded with XP and coins, merged into course progress and checked
//! against the achievement catalog, then written back as a single partial
//! profile update.
//!
//! ## Layout
//!
//! - [`domain`]: plain data (profiles, courses, questions, shop items)
//! - [`engine`]: pure scoring, reward, progress and achievement logic
//! - [`store`]: content and profile persistence (SQLite or in-memory)
//! - [`notify`]: staggered toast notifications after a submission
//! - [`session`]: the signed-in user passed to engine calls

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod notify;
pub mod session;
pub mod store;

pub use domain::*;
pub use error::{EngineError, EngineResult};
pub use session::Session;
