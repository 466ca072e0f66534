mod progress;
mod score;
mod tracker;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use score::{QuestionReview, ScoredResult};
pub use tracker::{AnswerState, AnswerStatus, NavTarget, QuizSession};
pub use view::{palette, PaletteItem, QuestionView};
pub use workflow::QuizWorkflow;
