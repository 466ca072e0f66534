mod profile;
mod question;
mod quiz;

pub use profile::{
    Difficulty, ProfileError, QuizRequest, UserProfile, GATE_CSE_SUBJECTS,
    MAX_QUESTIONS_PER_QUIZ,
};
pub use question::{Question, QuestionId, QuestionTags};
pub use quiz::{QuestionDraft, QuizDraft, QuizPayload, QuizValidationError};
