mod client;
mod notes;
mod quiz;

pub use crate::error::GenerationError;
pub use client::{ChatClient, ChatConfig};
pub use notes::NotesGenerator;
pub use quiz::QuizGenerator;
