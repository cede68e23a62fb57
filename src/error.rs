//! Engine error type

/// Errors raised by engine operations. None of these leave session state corrupted.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("No questions available for {0}")]
    NoQuestions(String),

    #[error("No {0} power-ups left")]
    PowerUpUnavailable(&'static str),

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Insufficient coins: {cost} needed, {balance} available")]
    InsufficientCoins { cost: u64, balance: u64 },

    #[error("Unknown shop item: {0}")]
    UnknownItem(String),

    #[error("Theme already owned: {0}")]
    AlreadyOwned(String),

    #[error("Theme not owned: {0}")]
    ThemeNotOwned(String),

    #[error("Daily challenge already completed today")]
    DailyAlreadyTaken,

    #[error("Quiz not finished: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    #[error("Expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("Unknown course: {0}")]
    UnknownCourse(String),

    #[error("Unknown tense {tense_id} in course {course_id}")]
    UnknownTense { course_id: String, tense_id: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
