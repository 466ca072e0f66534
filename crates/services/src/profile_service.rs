use std::collections::BTreeMap;
use std::sync::Arc;

use clurious_core::model::UserProfile;
use storage::repository::ProfileRepository;

use crate::error::ProfileServiceError;
use crate::generation::ChatClient;
use crate::sessions::ScoredResult;
use crate::Clock;

/// Weight of the existing mastery score when blending in a new attempt.
const MASTERY_CARRYOVER: f64 = 0.8;

/// Outcome of a profile update: both snapshots plus the optional coach note.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub previous: UserProfile,
    pub updated: UserProfile,
    pub insight: Option<String>,
}

/// Updates the learner profile after a submitted attempt.
///
/// The numeric part is deterministic; the progress insight is a best-effort
/// model call and its failure never blocks the update.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    store: Arc<dyn ProfileRepository>,
    client: ChatClient,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn ProfileRepository>, client: ChatClient) -> Self {
        Self {
            clock,
            store,
            client,
        }
    }

    /// Fold a scored attempt into the stored profile.
    ///
    /// Per touched topic the mastery score becomes
    /// `0.8 * old + 0.2 * attempt_percent`; unseen topics start at the
    /// attempt percentage. The updated profile is persisted before returning.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` when the profile cannot be
    /// loaded or saved. Insight generation failures are logged and skipped.
    pub async fn apply_result(
        &self,
        result: &ScoredResult,
    ) -> Result<ProfileUpdate, ProfileServiceError> {
        let previous = self.store.load().await?;

        let mut updated = previous.clone();
        for (topic, percent) in topic_percentages(result) {
            let blended = match updated.mastery_scores.get(&topic) {
                Some(old) => old * MASTERY_CARRYOVER + percent * (1.0 - MASTERY_CARRYOVER),
                None => percent,
            };
            updated
                .mastery_scores
                .insert(topic, (blended * 10.0).round() / 10.0);
        }
        updated.updated_at = Some(self.clock.now());

        let insight = match self.generate_insight(&previous, &updated).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(error = %e, "progress insight unavailable");
                None
            }
        };

        self.store.save(&updated).await?;
        tracing::info!(
            topics = updated.mastery_scores.len(),
            "profile updated after quiz"
        );

        Ok(ProfileUpdate {
            previous,
            updated,
            insight,
        })
    }

    async fn generate_insight(
        &self,
        previous: &UserProfile,
        updated: &UserProfile,
    ) -> Result<String, crate::error::GenerationError> {
        let prompt = format!(
            "# ROLE & GOAL\n\
             You are an expert {exam} learning coach. Analyze a student's progress by \
             comparing their profile before and after a quiz, then give a concise, \
             encouraging summary of the most important changes.\n\n\
             # CONTEXT: STUDENT'S PROGRESS\n\
             - Old profile snapshot: {old}\n\
             - New profile snapshot (after quiz): {new}\n\n\
             # TASK\n\
             Write a short, human summary (2-3 sentences). Highlight one key \
             improvement and one area that still needs focus.\n\n\
             # OUTPUT FORMAT\n\
             A single paragraph of encouraging text.",
            exam = updated.target_exam,
            old = serde_json::to_string(previous).unwrap_or_else(|_| "{}".into()),
            new = serde_json::to_string(updated).unwrap_or_else(|_| "{}".into()),
        );
        self.client.complete(&prompt, 0.2).await
    }
}

/// Per-topic score percentage for the reviews that carry a topic tag.
fn topic_percentages(result: &ScoredResult) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for review in result.reviews() {
        let Some(topic) = review.topic.as_deref() else {
            continue;
        };
        let entry = totals.entry(topic.to_owned()).or_default();
        entry.1 += 1;
        if review.is_correct() {
            entry.0 += 1;
        }
    }

    totals
        .into_iter()
        .map(|(topic, (correct, total))| {
            (topic, f64::from(correct) * 100.0 / f64::from(total))
        })
        .collect()
}
