use clurious_core::model::{QuizPayload, QuizRequest, UserProfile};

use crate::error::{GenerationError, SessionError};
use crate::generation::{ChatClient, NotesGenerator, QuizGenerator};
use crate::Clock;

use super::score::ScoredResult;
use super::tracker::{NavTarget, QuizSession};

/// Orchestrates one quiz attempt end to end.
///
/// Owns the time source and the generation collaborators so the tracker and
/// the UI never touch wall-clock time or HTTP directly. A failed generation
/// call surfaces the error and constructs no session.
#[derive(Clone)]
pub struct QuizWorkflow {
    clock: Clock,
    quizzes: QuizGenerator,
    notes: NotesGenerator,
}

impl QuizWorkflow {
    #[must_use]
    pub fn new(clock: Clock, quizzes: QuizGenerator, notes: NotesGenerator) -> Self {
        Self {
            clock,
            quizzes,
            notes,
        }
    }

    /// Workflow wired from `CLURIOUS_AI_*` environment variables.
    #[must_use]
    pub fn from_env(clock: Clock) -> Self {
        let client = ChatClient::from_env();
        Self::new(
            clock,
            QuizGenerator::new(client.clone()),
            NotesGenerator::new(client),
        )
    }

    /// Generate a quiz for the profile and open a session over it.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the collaborator fails; no session is
    /// created in that case.
    pub async fn start(
        &self,
        profile: &UserProfile,
        request: &QuizRequest,
    ) -> Result<QuizSession, GenerationError> {
        let payload = self.quizzes.generate(profile, request).await?;
        Ok(self.start_with_payload(payload))
    }

    /// Open a session over an already validated payload.
    #[must_use]
    pub fn start_with_payload(&self, payload: QuizPayload) -> QuizSession {
        QuizSession::new(payload, self.clock.now())
    }

    /// Navigate using the workflow clock for time attribution.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the tracker.
    pub fn navigate(
        &self,
        session: &mut QuizSession,
        target: NavTarget,
    ) -> Result<(), SessionError> {
        session.navigate(target, self.clock.now())
    }

    /// Submit using the workflow clock for the final time attribution.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the tracker.
    pub fn submit(&self, session: &mut QuizSession) -> Result<ScoredResult, SessionError> {
        session.submit(self.clock.now())
    }

    /// Markdown study notes for a submitted attempt.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the collaborator fails; the scored result
    /// is read-only and unaffected.
    pub async fn study_notes(&self, result: &ScoredResult) -> Result<String, GenerationError> {
        self.notes.generate(result).await
    }
}
