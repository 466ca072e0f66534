use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::quiz::QuizValidationError;

//
// ─── QUESTION ID ───────────────────────────────────────────────────────────────
//

/// Opaque question identifier, unique within one quiz.
///
/// Identifiers come from the generation service (`"Q1"`, `"DS_TREE_01"`, ...)
/// and are never interpreted beyond equality.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Classification tags attached by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTags {
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub cognitive_skill_tested: Option<String>,
}

/// A single multiple-choice question, immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_index: usize,
    hint: String,
    explanation: String,
    tags: Option<QuestionTags>,
}

impl Question {
    /// Builds a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError::TooFewOptions` if fewer than two options
    /// are given, or `QuizValidationError::CorrectIndexOutOfRange` if
    /// `correct_index` does not address an option.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        hint: impl Into<String>,
        explanation: impl Into<String>,
        tags: Option<QuestionTags>,
    ) -> Result<Self, QuizValidationError> {
        if options.len() < 2 {
            return Err(QuizValidationError::TooFewOptions {
                id,
                len: options.len(),
            });
        }
        if correct_index >= options.len() {
            return Err(QuizValidationError::CorrectIndexOutOfRange {
                id,
                index: correct_index,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            text: text.into(),
            options,
            correct_index,
            hint: hint.into(),
            explanation: explanation.into(),
            tags,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the canonical correct option.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn tags(&self) -> Option<&QuestionTags> {
        self.tags.as_ref()
    }

    /// Topic tag, when the generation service supplied one.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.tags.as_ref().and_then(|t| t.topic.as_deref())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn question_rejects_single_option() {
        let err = Question::new(
            QuestionId::new("Q1"),
            "text",
            options(1),
            0,
            "hint",
            "explanation",
            None,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            QuizValidationError::TooFewOptions { len: 1, .. }
        ));
    }

    #[test]
    fn question_rejects_correct_index_out_of_range() {
        let err = Question::new(
            QuestionId::new("Q1"),
            "text",
            options(4),
            4,
            "hint",
            "explanation",
            None,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            QuizValidationError::CorrectIndexOutOfRange {
                index: 4,
                len: 4,
                ..
            }
        ));
    }

    #[test]
    fn question_exposes_correct_option_text() {
        let q = Question::new(
            QuestionId::new("Q1"),
            "text",
            options(4),
            2,
            "hint",
            "explanation",
            None,
        )
        .unwrap();

        assert_eq!(q.correct_option(), "option 2");
    }

    #[test]
    fn question_id_display_is_raw() {
        let id = QuestionId::new("ALGO_GRAPH_02");
        assert_eq!(id.to_string(), "ALGO_GRAPH_02");
        assert_eq!(format!("{id:?}"), "QuestionId(ALGO_GRAPH_02)");
    }
}
