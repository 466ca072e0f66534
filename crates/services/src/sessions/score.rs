use chrono::{DateTime, Utc};
use serde::Serialize;

use clurious_core::model::QuestionId;

use super::tracker::AnswerStatus;

/// Per-question detail inside a `ScoredResult`.
///
/// Carries raw data only; "not answered" rendering for an unset selection is
/// left to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionReview {
    pub question_id: QuestionId,
    pub text: String,
    pub topic: Option<String>,
    pub selected: Option<String>,
    pub correct_answer: String,
    pub status: AnswerStatus,
    pub explanation: String,
    pub hint_used: bool,
    pub time_spent_secs: f64,
}

impl QuestionReview {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.status == AnswerStatus::Correct
    }
}

/// Finalized, read-only summary of a submitted quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    title: String,
    correct_count: u32,
    total_count: u32,
    score_percent: f64,
    total_time_secs: f64,
    submitted_at: DateTime<Utc>,
    reviews: Vec<QuestionReview>,
}

impl ScoredResult {
    pub(crate) fn new(
        title: String,
        correct_count: u32,
        reviews: Vec<QuestionReview>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let total_count = reviews.len() as u32;
        let score_percent = if total_count == 0 {
            0.0
        } else {
            f64::from(correct_count) * 100.0 / f64::from(total_count)
        };
        let total_time_secs = reviews.iter().map(|r| r.time_spent_secs).sum();
        Self {
            title,
            correct_count,
            total_count,
            score_percent,
            total_time_secs,
            submitted_at,
            reviews,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Score as a percentage in [0, 100].
    #[must_use]
    pub fn score_percent(&self) -> f64 {
        self.score_percent
    }

    /// Sum of per-question time, in seconds.
    #[must_use]
    pub fn total_time_secs(&self) -> f64 {
        self.total_time_secs
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    #[must_use]
    pub fn reviews(&self) -> &[QuestionReview] {
        &self.reviews
    }

    /// Reviews for questions that did not score correct.
    pub fn mistakes(&self) -> impl Iterator<Item = &QuestionReview> {
        self.reviews.iter().filter(|r| !r.is_correct())
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct_count == self.total_count
    }
}
