use chrono::{DateTime, Utc};
use std::fmt;

use clurious_core::model::{Question, QuizPayload};

use super::progress::SessionProgress;
use super::score::{QuestionReview, ScoredResult};
use crate::error::SessionError;

//
// ─── ANSWER STATE ──────────────────────────────────────────────────────────────
//

/// Outcome of one question, derived at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum AnswerStatus {
    Unanswered,
    Correct,
    Incorrect,
}

/// Mutable record of the user's interaction with one question.
///
/// `time_spent_secs` only grows while the session is live and is frozen by
/// submission, together with the selection and hint flag.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerState {
    selected: Option<usize>,
    status: AnswerStatus,
    time_spent_secs: f64,
    hint_used: bool,
}

impl AnswerState {
    fn new() -> Self {
        Self {
            selected: None,
            status: AnswerStatus::Unanswered,
            time_spent_secs: 0.0,
            hint_used: false,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn status(&self) -> AnswerStatus {
        self.status
    }

    #[must_use]
    pub fn time_spent_secs(&self) -> f64 {
        self.time_spent_secs
    }

    #[must_use]
    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }
}

//
// ─── NAVIGATION ────────────────────────────────────────────────────────────────
//

/// Navigation request: arrow buttons or a palette jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Previous,
    Next,
    Index(usize),
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// One in-progress or completed quiz attempt.
///
/// Owns the question list plus one `AnswerState` per question and steps
/// through them under caller navigation. Timestamps are supplied by the
/// caller (normally `QuizWorkflow`'s clock) so timing stays deterministic.
///
/// Time is attributed to the question being navigated *away from*: every
/// switch first charges the elapsed span since `last_switch_at` to the
/// outgoing question, then moves `current`, then resets `last_switch_at`.
pub struct QuizSession {
    title: String,
    questions: Vec<Question>,
    answers: Vec<AnswerState>,
    current: usize,
    started_at: DateTime<Utc>,
    last_switch_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over a validated payload.
    ///
    /// The payload's invariants (non-empty, sane options and indices) carry
    /// over, so the session always has a displayable current question.
    #[must_use]
    pub fn new(payload: QuizPayload, started_at: DateTime<Utc>) -> Self {
        let (title, questions) = payload.into_parts();
        let answers = questions.iter().map(|_| AnswerState::new()).collect();
        Self {
            title,
            questions,
            answers,
            current: 0,
            started_at,
            last_switch_at: started_at,
            submitted_at: None,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&AnswerState> {
        self.answers.get(index)
    }

    #[must_use]
    pub fn current_answer(&self) -> &AnswerState {
        &self.answers[self.current]
    }

    /// Counts answered questions. Pure read, callable in any state.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.answers.iter().filter(|a| a.is_answered()).count();
        SessionProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: self.is_submitted(),
        }
    }

    /// Select an option for the current question.
    ///
    /// Re-selecting the same index is a no-op; there is no auto-advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` after submission and
    /// `SessionError::AnswerOutOfRange` for an index past the option list.
    pub fn select_answer(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_live()?;
        let len = self.questions[self.current].options().len();
        if index >= len {
            return Err(SessionError::AnswerOutOfRange { index, len });
        }
        self.answers[self.current].selected = Some(index);
        Ok(())
    }

    /// Clear the current question's selection. No-op when already unset.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` after submission.
    pub fn clear_answer(&mut self) -> Result<(), SessionError> {
        self.ensure_live()?;
        self.answers[self.current].selected = None;
        Ok(())
    }

    /// Reveal the current question's hint and record that it was used.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` after submission.
    pub fn use_hint(&mut self) -> Result<&str, SessionError> {
        self.ensure_live()?;
        self.answers[self.current].hint_used = true;
        Ok(self.questions[self.current].hint())
    }

    /// Move to another question.
    ///
    /// On success the elapsed span since the last switch is charged to the
    /// outgoing question before `current` changes. A rejected target leaves
    /// every field untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfRange` when the resolved index falls
    /// outside the question list, `SessionError::AlreadySubmitted` after
    /// submission.
    pub fn navigate(&mut self, target: NavTarget, now: DateTime<Utc>) -> Result<(), SessionError> {
        self.ensure_live()?;
        let len = self.questions.len();
        let resolved = match target {
            NavTarget::Previous => self.current.checked_sub(1),
            NavTarget::Next => Some(self.current + 1).filter(|&i| i < len),
            NavTarget::Index(i) => Some(i).filter(|&i| i < len),
        };
        let Some(next) = resolved else {
            return Err(SessionError::OutOfRange { len });
        };

        self.charge_elapsed(now);
        self.current = next;
        Ok(())
    }

    /// Finalize the attempt and score every question.
    ///
    /// The final question receives the same time attribution a navigation
    /// would have applied. An unset selection scores as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` on a second call; the first
    /// result stays authoritative.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<ScoredResult, SessionError> {
        self.ensure_live()?;
        self.charge_elapsed(now);

        let mut correct = 0_u32;
        let mut reviews = Vec::with_capacity(self.questions.len());
        for (question, answer) in self.questions.iter().zip(self.answers.iter_mut()) {
            answer.status = if answer.selected == Some(question.correct_index()) {
                correct += 1;
                AnswerStatus::Correct
            } else {
                AnswerStatus::Incorrect
            };
            reviews.push(QuestionReview {
                question_id: question.id().clone(),
                text: question.text().to_owned(),
                topic: question.topic().map(str::to_owned),
                selected: answer
                    .selected
                    .map(|i| question.options()[i].clone()),
                correct_answer: question.correct_option().to_owned(),
                status: answer.status,
                explanation: question.explanation().to_owned(),
                hint_used: answer.hint_used,
                time_spent_secs: answer.time_spent_secs,
            });
        }

        self.submitted_at = Some(now);
        Ok(ScoredResult::new(self.title.clone(), correct, reviews, now))
    }

    fn ensure_live(&self) -> Result<(), SessionError> {
        if self.is_submitted() {
            return Err(SessionError::AlreadySubmitted);
        }
        Ok(())
    }

    /// Charge time since the last switch to the currently displayed question.
    fn charge_elapsed(&mut self, now: DateTime<Utc>) {
        let elapsed = (now - self.last_switch_at).num_milliseconds() as f64 / 1000.0;
        self.answers[self.current].time_spent_secs += elapsed.max(0.0);
        self.last_switch_at = now;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("title", &self.title)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("started_at", &self.started_at)
            .field("submitted_at", &self.submitted_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use clurious_core::model::{Question, QuestionId, QuizPayload, QuizValidationError};
    use clurious_core::time::fixed_now;

    fn question(id: &str, correct: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("text for {id}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
            "hint",
            "explanation",
            None,
        )
        .unwrap()
    }

    fn payload(n: usize) -> QuizPayload {
        let questions = (0..n).map(|i| question(&format!("Q{i}"), i % 4)).collect();
        QuizPayload::new("Test Quiz", questions).unwrap()
    }

    fn session(n: usize) -> QuizSession {
        QuizSession::new(payload(n), fixed_now())
    }

    #[test]
    fn empty_payload_cannot_reach_a_session() {
        let err = QuizPayload::new("Empty", Vec::new()).unwrap_err();
        assert!(matches!(err, QuizValidationError::Empty));
    }

    #[test]
    fn single_question_session_starts_at_zero() {
        let s = QuizSession::new(
            QuizPayload::new("One", vec![question("Q0", 0)]).unwrap(),
            fixed_now(),
        );
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.total_questions(), 1);
    }

    #[test]
    fn navigation_stays_in_bounds_and_rejections_leave_state() {
        let mut s = session(3);
        let now = fixed_now();

        s.navigate(NavTarget::Next, now).unwrap();
        s.navigate(NavTarget::Next, now).unwrap();
        assert_eq!(s.current_index(), 2);

        let err = s.navigate(NavTarget::Next, now).unwrap_err();
        assert!(matches!(err, SessionError::OutOfRange { len: 3 }));
        assert_eq!(s.current_index(), 2);

        s.navigate(NavTarget::Index(0), now).unwrap();
        let err = s.navigate(NavTarget::Previous, now).unwrap_err();
        assert!(matches!(err, SessionError::OutOfRange { len: 3 }));
        assert_eq!(s.current_index(), 0);

        let err = s.navigate(NavTarget::Index(3), now).unwrap_err();
        assert!(matches!(err, SessionError::OutOfRange { len: 3 }));
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn select_then_clear_is_equivalent_to_never_selecting() {
        let mut s = session(2);
        s.select_answer(2).unwrap();
        assert_eq!(s.current_answer().selected(), Some(2));

        s.clear_answer().unwrap();
        assert_eq!(s.current_answer().selected(), None);
        assert_eq!(s.progress().answered, 0);

        // clearing an unset answer is a no-op
        s.clear_answer().unwrap();
        assert_eq!(s.current_answer().selected(), None);
    }

    #[test]
    fn select_rejects_index_past_option_list() {
        let mut s = session(1);
        let err = s.select_answer(4).unwrap_err();
        assert!(matches!(
            err,
            SessionError::AnswerOutOfRange { index: 4, len: 4 }
        ));
        assert_eq!(s.current_answer().selected(), None);
    }

    #[test]
    fn progress_counts_set_selections() {
        let mut s = session(3);
        let now = fixed_now();

        assert_eq!(s.progress().answered, 0);
        s.select_answer(0).unwrap();
        s.navigate(NavTarget::Next, now).unwrap();
        s.select_answer(1).unwrap();

        let progress = s.progress();
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.remaining, 1);
        assert!(!progress.is_complete);
    }

    #[test]
    fn time_is_charged_to_the_outgoing_question() {
        let mut s = session(2);
        let mut now = fixed_now();

        // 10s on question 0, then move away
        now += Duration::seconds(10);
        s.navigate(NavTarget::Next, now).unwrap();

        // 5s on question 1, back to 0
        now += Duration::seconds(5);
        s.navigate(NavTarget::Previous, now).unwrap();

        // 7s more on question 0, submit charges it
        now += Duration::seconds(7);
        let result = s.submit(now).unwrap();

        let reviews = result.reviews();
        assert_eq!(reviews[0].time_spent_secs, 17.0);
        assert_eq!(reviews[1].time_spent_secs, 5.0);
        assert_eq!(result.total_time_secs(), 22.0);
    }

    #[test]
    fn revisits_accumulate_time() {
        let mut s = session(2);
        let mut now = fixed_now();

        now += Duration::seconds(10);
        s.navigate(NavTarget::Next, now).unwrap();
        now += Duration::seconds(5);
        s.navigate(NavTarget::Previous, now).unwrap();
        now += Duration::seconds(5);
        s.navigate(NavTarget::Next, now).unwrap();

        assert!(s.answer(0).unwrap().time_spent_secs() >= 15.0);
        assert_eq!(s.answer(1).unwrap().time_spent_secs(), 5.0);
    }

    #[test]
    fn failed_navigation_does_not_charge_time() {
        let mut s = session(1);
        let now = fixed_now() + Duration::seconds(30);

        let _ = s.navigate(NavTarget::Next, now).unwrap_err();
        assert_eq!(s.answer(0).unwrap().time_spent_secs(), 0.0);
    }

    #[test]
    fn scoring_three_of_five_yields_sixty_percent() {
        let mut s = session(5);
        let now = fixed_now();

        // correct answers on questions 0, 2, 4; wrong on 1, 3
        for i in 0..5 {
            if i > 0 {
                s.navigate(NavTarget::Index(i), now).unwrap();
            }
            let correct = s.current_question().correct_index();
            let pick = if i % 2 == 0 { correct } else { (correct + 1) % 4 };
            s.select_answer(pick).unwrap();
        }

        let result = s.submit(now).unwrap();
        assert_eq!(result.correct_count(), 3);
        assert_eq!(result.total_count(), 5);
        assert_eq!(result.score_percent(), 60.0);
    }

    #[test]
    fn unanswered_questions_score_incorrect() {
        let mut s = session(2);
        let now = fixed_now();
        let correct = s.current_question().correct_index();
        s.select_answer(correct).unwrap();

        let result = s.submit(now).unwrap();
        assert_eq!(result.correct_count(), 1);
        assert_eq!(result.reviews()[1].status, AnswerStatus::Incorrect);
        assert_eq!(result.reviews()[1].selected, None);
    }

    #[test]
    fn second_submit_is_rejected_and_answers_stay_frozen() {
        let mut s = session(2);
        let mut now = fixed_now();

        s.select_answer(0).unwrap();
        now += Duration::seconds(3);
        let first = s.submit(now).unwrap();
        let frozen_time = s.answer(0).unwrap().time_spent_secs();

        now += Duration::seconds(60);
        assert!(matches!(s.submit(now), Err(SessionError::AlreadySubmitted)));
        assert!(matches!(
            s.select_answer(1),
            Err(SessionError::AlreadySubmitted)
        ));
        assert!(matches!(s.clear_answer(), Err(SessionError::AlreadySubmitted)));
        assert!(matches!(
            s.navigate(NavTarget::Next, now),
            Err(SessionError::AlreadySubmitted)
        ));

        assert_eq!(s.answer(0).unwrap().time_spent_secs(), frozen_time);
        assert_eq!(s.answer(0).unwrap().selected(), Some(0));
        assert_eq!(first.total_count(), 2);
        assert!(s.progress().is_complete);
    }

    #[test]
    fn hint_is_recorded_per_question() {
        let mut s = session(2);
        let hint = s.use_hint().unwrap().to_owned();
        assert_eq!(hint, "hint");
        assert!(s.current_answer().hint_used());
        assert!(!s.answer(1).unwrap().hint_used());

        let result = s.submit(fixed_now()).unwrap();
        assert!(result.reviews()[0].hint_used);
        assert!(!result.reviews()[1].hint_used);
    }

    #[test]
    fn backwards_clock_never_decreases_time() {
        let mut s = session(2);
        let now = fixed_now() - Duration::seconds(10);

        s.navigate(NavTarget::Next, now).unwrap();
        assert_eq!(s.answer(0).unwrap().time_spent_secs(), 0.0);
    }
}
