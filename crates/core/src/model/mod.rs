mod question;
mod score;
mod settings;

pub use question::{AnswerCheck, Question};
pub use score::{LessonStatus, PASS_THRESHOLD, ScoreError, ScoreReport};
pub use settings::{DrillSettings, DrillSettingsError, LaunchOptions};
