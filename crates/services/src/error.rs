//! Shared error types for the services crate.

use thiserror::Error;

use clurious_core::model::QuizValidationError;
use storage::repository::StorageError;

/// Errors emitted by the quiz session tracker.
///
/// Every rejection leaves the session exactly as it was: operations either
/// fully apply or fully refuse.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    InvalidQuiz(#[from] QuizValidationError),

    #[error("navigation target outside 0..{len}")]
    OutOfRange { len: usize },

    #[error("answer index {index} outside 0..{len} for the current question")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error("quiz already submitted")]
    AlreadySubmitted,
}

/// Errors emitted by the generation collaborators.
///
/// All of these are retryable from the caller's perspective; no session or
/// answer state is touched on a failed generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("generation is not configured")]
    Disabled,

    #[error("generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("generation returned an empty response")]
    EmptyResponse,

    #[error("generation returned malformed JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidQuiz(#[from] QuizValidationError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
