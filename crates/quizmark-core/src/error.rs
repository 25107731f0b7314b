//! Caller-facing error types.
//!
//! Route handlers sit between this core and the learner; these variants
//! are defined here so handlers can map failures onto responses without
//! string matching.

use thiserror::Error;

/// Errors surfaced to callers when a quiz interaction cannot proceed.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The learner has no active enrollment for the course.
    #[error("you are not enrolled in this course")]
    NotEnrolled,

    /// No quiz exists under the given identifier.
    #[error("quiz not found: {0}")]
    QuizNotFound(String),

    /// The quiz exists but holds no questions to grade.
    #[error("quiz has no questions")]
    EmptyQuiz,

    /// The learner has used up every allowed attempt.
    #[error("maximum number of attempts ({max_attempts}) reached")]
    MaxAttemptsReached { max_attempts: u32 },

    /// A submission arrived with no attempt in progress.
    #[error("no active quiz attempt found")]
    NoActiveAttempt,
}

impl QuizError {
    /// HTTP status the web layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            QuizError::NotEnrolled | QuizError::MaxAttemptsReached { .. } => 403,
            QuizError::QuizNotFound(_) => 404,
            QuizError::EmptyQuiz | QuizError::NoActiveAttempt => 400,
        }
    }
}
