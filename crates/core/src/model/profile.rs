use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("question count must be between 1 and {max}, got {count}")]
    InvalidQuestionCount { count: u32, max: u32 },

    #[error("custom quiz needs at least one subject")]
    NoSubjects,
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Requested quiz level, mirrored into the generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

//
// ─── QUIZ REQUEST ──────────────────────────────────────────────────────────────
//

/// Upper bound on questions per quiz, matching the design form.
pub const MAX_QUESTIONS_PER_QUIZ: u32 = 10;

/// GATE CSE syllabus subjects offered by the custom quiz form.
pub const GATE_CSE_SUBJECTS: [&str; 10] = [
    "Engineering Mathematics",
    "Digital Logic",
    "Computer Organization and Architecture",
    "Programming and Data Structures",
    "Algorithms",
    "Theory of Computation",
    "Compiler Design",
    "Operating System",
    "Databases",
    "Computer Networks",
];

/// Constraints for one quiz generation call.
///
/// An empty subject list means full syllabus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    subjects: Vec<String>,
    question_count: u32,
    difficulty: Difficulty,
}

impl QuizRequest {
    /// Full-syllabus request.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidQuestionCount` when `question_count` is
    /// zero or above `MAX_QUESTIONS_PER_QUIZ`.
    pub fn full_syllabus(
        question_count: u32,
        difficulty: Difficulty,
    ) -> Result<Self, ProfileError> {
        Self::build(Vec::new(), question_count, difficulty)
    }

    /// Subject-scoped request.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoSubjects` for an empty subject list, or
    /// `ProfileError::InvalidQuestionCount` for a bad count.
    pub fn custom(
        subjects: Vec<String>,
        question_count: u32,
        difficulty: Difficulty,
    ) -> Result<Self, ProfileError> {
        if subjects.is_empty() {
            return Err(ProfileError::NoSubjects);
        }
        Self::build(subjects, question_count, difficulty)
    }

    fn build(
        subjects: Vec<String>,
        question_count: u32,
        difficulty: Difficulty,
    ) -> Result<Self, ProfileError> {
        if question_count == 0 || question_count > MAX_QUESTIONS_PER_QUIZ {
            return Err(ProfileError::InvalidQuestionCount {
                count: question_count,
                max: MAX_QUESTIONS_PER_QUIZ,
            });
        }
        Ok(Self {
            subjects,
            question_count,
            difficulty,
        })
    }

    #[must_use]
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    #[must_use]
    pub fn is_full_syllabus(&self) -> bool {
        self.subjects.is_empty()
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

//
// ─── USER PROFILE ──────────────────────────────────────────────────────────────
//

/// Persisted learner profile used to personalize generation.
///
/// `mastery_scores` maps topic names to a 0-100 score; both maps survive
/// round trips through the JSON profile store unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub target_exam: String,
    #[serde(default)]
    pub mastery_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub cognitive_skill_weaknesses: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Builds a fresh profile from the signup form.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyName` for a blank name.
    pub fn new(
        name: impl Into<String>,
        target_exam: impl Into<String>,
    ) -> Result<Self, ProfileError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        Ok(Self {
            name,
            target_exam: target_exam.into(),
            mastery_scores: BTreeMap::new(),
            cognitive_skill_weaknesses: Vec::new(),
            updated_at: None,
        })
    }

    /// Mastery score for a topic, when one has been recorded.
    #[must_use]
    pub fn mastery(&self, topic: &str) -> Option<f64> {
        self.mastery_scores.get(topic).copied()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_rejects_zero_questions() {
        let err = QuizRequest::full_syllabus(0, Difficulty::Medium).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InvalidQuestionCount { count: 0, .. }
        ));
    }

    #[test]
    fn request_rejects_count_above_cap() {
        let err = QuizRequest::full_syllabus(11, Difficulty::Easy).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InvalidQuestionCount { count: 11, max: 10 }
        ));
    }

    #[test]
    fn custom_request_needs_subjects() {
        let err = QuizRequest::custom(Vec::new(), 5, Difficulty::Hard).unwrap_err();
        assert!(matches!(err, ProfileError::NoSubjects));
    }

    #[test]
    fn full_syllabus_request_has_no_subjects() {
        let req = QuizRequest::full_syllabus(5, Difficulty::Medium).unwrap();
        assert!(req.is_full_syllabus());
        assert_eq!(req.question_count(), 5);
    }

    #[test]
    fn profile_rejects_blank_name() {
        let err = UserProfile::new("   ", "GATE CSE").unwrap_err();
        assert!(matches!(err, ProfileError::EmptyName));
    }

    #[test]
    fn difficulty_display_matches_form_labels() {
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }
}
