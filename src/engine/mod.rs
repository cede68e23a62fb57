//! Scoring, rewards and progression
//!
//! Everything here is synchronous and pure apart from [`submission::commit`].

pub mod achievements;
pub mod daily;
pub mod leaderboard;
pub mod levels;
pub mod limits;
pub mod progress;
pub mod quiz_session;
pub mod rewards;
pub mod sampling;
pub mod scoring;
pub mod shop;
pub mod streaks;
pub mod submission;

pub use achievements::{Achievement, AchievementId, Evaluation, ACHIEVEMENTS};
pub use leaderboard::{LeaderboardEntry, Standing};
pub use levels::Level;
pub use limits::QuizLimits;
pub use quiz_session::{PowerUpUsage, QuizSession};
pub use rewards::{Reward, RewardFormula, RewardTable};
pub use streaks::DayBoundary;
pub use submission::{commit, Outcome, Persisted, SubmissionPlan};
