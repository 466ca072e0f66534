use std::fmt::Write as _;

use crate::error::GenerationError;
use crate::sessions::ScoredResult;

use super::client::ChatClient;

/// Generates a Markdown cheat sheet from a submitted attempt.
#[derive(Clone)]
pub struct NotesGenerator {
    client: ChatClient,
}

impl NotesGenerator {
    #[must_use]
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ChatClient::from_env())
    }

    /// Produce study notes focused on the questions the student missed.
    ///
    /// A perfect score short-circuits without a model call.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` for transport failures or empty responses.
    pub async fn generate(&self, result: &ScoredResult) -> Result<String, GenerationError> {
        if result.is_perfect() {
            return Ok(PERFECT_SCORE_NOTES.to_string());
        }

        let prompt = build_prompt(result);
        let notes = self.client.complete(&prompt, 0.2).await?;
        tracing::info!(
            mistakes = result.mistakes().count(),
            "study notes generated"
        );
        Ok(notes)
    }
}

const PERFECT_SCORE_NOTES: &str =
    "Great job! You answered every question correctly. No specific notes needed for this session.";

fn build_prompt(result: &ScoredResult) -> String {
    let mut mistakes = String::new();
    for (i, review) in result.mistakes().enumerate() {
        let _ = writeln!(mistakes, "### Mistake #{}", i + 1);
        let _ = writeln!(mistakes, "- **Question:** {}", review.text);
        let _ = writeln!(
            mistakes,
            "- **Student's Answer:** {}",
            review.selected.as_deref().unwrap_or("(not answered)")
        );
        let _ = writeln!(mistakes, "- **Correct Answer:** {}", review.correct_answer);
        let _ = writeln!(
            mistakes,
            "- **Correct Explanation:** {}",
            review.explanation
        );
        let _ = writeln!(mistakes, "---");
    }

    format!(
        "# ROLE & GOAL\n\
         You are an expert tutor who excels at creating ultra-concise, high-impact \
         cheat sheets for revision. Generate a personalized, quick-reference study \
         note for a student based on the concepts they got wrong in the quiz \
         \"{title}\" (scored {correct}/{total}).\n\n\
         # CONTEXT: STUDENT'S MISTAKES\n\
         {mistakes}\n\
         # TASK\n\
         For each major concept the student failed, create a \"Quick Reference\" \
         section containing only these three things:\n\
         1. **The Key Formula / Rule:** the single most important formula or rule.\n\
         2. **The Core Logic:** a 1-2 sentence explanation of the fundamental idea.\n\
         3. **A Personalized Tip:** a short, actionable tip tied to the student's mistake.\n\n\
         # OUTPUT FORMAT REQUIREMENTS\n\
         Respond in clean, well-structured Markdown. Keep it simple and scannable; \
         no long paragraphs.",
        title = result.title(),
        correct = result.correct_count(),
        total = result.total_count(),
    )
}
