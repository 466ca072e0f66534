use std::fmt::Write as _;

use rand::rng;
use rand::seq::IndexedRandom;

use clurious_core::model::{QuizDraft, QuizPayload, QuizRequest, UserProfile};

use crate::error::GenerationError;

use super::client::ChatClient;

/// Generates personalized quizzes through the chat-completions collaborator.
#[derive(Clone)]
pub struct QuizGenerator {
    client: ChatClient,
}

impl QuizGenerator {
    #[must_use]
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ChatClient::from_env())
    }

    /// Build the designer prompt, call the model and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` for transport failures, malformed JSON, or a
    /// quiz that fails boundary validation (empty, bad options or indices).
    pub async fn generate(
        &self,
        profile: &UserProfile,
        request: &QuizRequest,
    ) -> Result<QuizPayload, GenerationError> {
        let prompt = build_prompt(profile, request);
        let raw = self.client.complete_json(&prompt, 0.7).await?;
        let payload = parse_quiz(&raw)?;
        tracing::info!(
            questions = payload.len(),
            title = payload.title(),
            "quiz generated"
        );
        Ok(payload)
    }
}

/// Parse and validate a raw generation response.
///
/// # Errors
///
/// Returns `GenerationError::MalformedResponse` for unparseable JSON and
/// `GenerationError::InvalidQuiz` when the parsed quiz breaks the contract.
pub fn parse_quiz(raw: &str) -> Result<QuizPayload, GenerationError> {
    let draft: QuizDraft = serde_json::from_str(raw)?;
    let payload = draft.validate().map_err(|e| {
        tracing::warn!(error = %e, "generated quiz failed validation");
        e
    })?;
    Ok(payload)
}

fn build_prompt(profile: &UserProfile, request: &QuizRequest) -> String {
    let scope = if request.is_full_syllabus() {
        "the full syllabus".to_string()
    } else {
        request.subjects().join(", ")
    };

    let mut prompt = String::new();
    let _ = writeln!(prompt, "# ROLE & GOAL");
    let _ = writeln!(
        prompt,
        "You are a world-class question designer for the {} exam. Generate a new, \
         original, high-quality quiz that targets this student's specific learning \
         needs based on their profile.",
        profile.target_exam
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "# STUDENT PROFILE & QUIZ CONSTRAINTS");
    let _ = writeln!(
        prompt,
        "user_profile: {}",
        serde_json::to_string(profile).unwrap_or_else(|_| "{}".into())
    );
    let _ = writeln!(
        prompt,
        "quiz_constraints: {}",
        serde_json::to_string(request).unwrap_or_else(|_| "{}".into())
    );
    let _ = writeln!(
        prompt,
        "Cover {scope}. Produce exactly {} questions at {} difficulty.",
        request.question_count(),
        request.difficulty()
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "# REFERENCE QUESTIONS");
    for example in sample_reference_questions(2) {
        let _ = writeln!(prompt, "{example}");
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "# OUTPUT FORMAT REQUIREMENTS");
    let _ = writeln!(
        prompt,
        "Respond with a single clean JSON object and nothing else, shaped exactly as:"
    );
    let _ = writeln!(prompt, "{OUTPUT_CONTRACT}");
    prompt
}

// Placeholder for retrieval from a question bank; mirrors the handful of
// curated examples the prototype shipped with.
const REFERENCE_QUESTIONS: [&str; 4] = [
    r#"{"question_text": "What is the maximum height difference allowed between two subtrees in an AVL tree?", "correct_answer": "1"}"#,
    r#"{"question_text": "Which rotation is performed for a Left-Right (LR) imbalance case in an AVL tree?", "correct_answer": "A left rotation on the left child, followed by a right rotation on the parent."}"#,
    r#"{"question_text": "What are the two key properties of a problem that suggest dynamic programming is a suitable solution?", "correct_answer": "Overlapping subproblems and optimal substructure."}"#,
    r#"{"question_text": "What is the time complexity of the naive recursive solution for the Fibonacci sequence?", "correct_answer": "O(2^n)"}"#,
];

fn sample_reference_questions(count: usize) -> Vec<&'static str> {
    let mut rng = rng();
    REFERENCE_QUESTIONS
        .choose_multiple(&mut rng, count)
        .copied()
        .collect()
}

const OUTPUT_CONTRACT: &str = r#"{
  "quiz_title": "A creative and relevant title for the quiz",
  "questions": [
    {
      "question_id": "A unique identifier like Q1, Q2, etc.",
      "question_text": "The full, formatted text of the question.",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correct_answer_index": 2,
      "hint": "A short, helpful hint that guides without giving away the answer.",
      "explanation": "A detailed, step-by-step solution explaining the correct answer.",
      "tags": {
        "topic": "The syllabus topic",
        "difficulty": "Easy | Medium | Hard",
        "cognitive_skill_tested": "The skill this question exercises"
      }
    }
  ]
}"#;
