use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::question::{Question, QuestionId, QuestionTags};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Rejections raised when a quiz payload fails boundary validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizValidationError {
    #[error("quiz contains no questions")]
    Empty,

    #[error("question {id} has {len} options, need at least 2")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id} marks option {index} correct but has only {len} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("duplicate question id {id}")]
    DuplicateId { id: QuestionId },
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

/// Unvalidated question as produced by the generation service.
///
/// Field names follow the JSON contract in the generation prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDraft {
    pub question_id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub tags: Option<QuestionTags>,
}

impl QuestionDraft {
    /// Validate the draft into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` if option count or the correct index is
    /// out of contract.
    pub fn validate(self) -> Result<Question, QuizValidationError> {
        Question::new(
            QuestionId::new(self.question_id),
            self.question_text,
            self.options,
            self.correct_answer_index,
            self.hint,
            self.explanation,
            self.tags,
        )
    }
}

/// Unvalidated quiz as deserialized from the generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizDraft {
    #[serde(rename = "quiz_title", alias = "title")]
    pub title: String,
    pub questions: Vec<QuestionDraft>,
}

impl QuizDraft {
    /// Validate every question and assemble the payload.
    ///
    /// # Errors
    ///
    /// Returns the first `QuizValidationError` encountered; an empty question
    /// list is rejected before any per-question check.
    pub fn validate(self) -> Result<QuizPayload, QuizValidationError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        QuizPayload::new(self.title, questions)
    }
}

//
// ─── PAYLOAD ───────────────────────────────────────────────────────────────────
//

/// A validated, non-empty quiz ready to back a session.
///
/// Construction is the only validation point: holders of a `QuizPayload` may
/// rely on at least one question, two or more options each, an in-range
/// correct index, and unique question ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPayload {
    title: String,
    questions: Vec<Question>,
}

impl QuizPayload {
    /// Builds a payload from already-validated questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError::Empty` for an empty list and
    /// `QuizValidationError::DuplicateId` when two questions share an id.
    pub fn new(
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, QuizValidationError> {
        if questions.is_empty() {
            return Err(QuizValidationError::Empty);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id().clone()) {
                return Err(QuizValidationError::DuplicateId {
                    id: question.id().clone(),
                });
            }
        }

        Ok(Self {
            title: title.into(),
            questions,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: empty payloads cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Question>) {
        (self.title, self.questions)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
