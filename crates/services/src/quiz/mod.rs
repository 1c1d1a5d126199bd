mod generator;
mod progress;
mod service;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use generator::QuestionGenerator;
pub use progress::{QuizProgress, QuizSummary};
pub use service::QuizSession;
