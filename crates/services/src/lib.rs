#![forbid(unsafe_code)]

pub mod error;
pub mod generation;
pub mod profile_service;
pub mod sessions;

pub use clurious_core::Clock;

pub use error::{GenerationError, ProfileServiceError, SessionError};
pub use generation::{ChatClient, ChatConfig, NotesGenerator, QuizGenerator};
pub use profile_service::{ProfileService, ProfileUpdate};
pub use sessions::{
    palette, AnswerState, AnswerStatus, NavTarget, PaletteItem, QuestionReview, QuestionView,
    QuizSession, QuizWorkflow, ScoredResult, SessionProgress,
};
