#![forbid(unsafe_code)]

//! Drill orchestration: question rounds, deferred UI tasks and the glue that
//! reports each round through the SCORM lifecycle.

pub mod error;
pub mod quiz;
pub mod tasks;
pub mod workflow;

pub use drill_core::Clock;

pub use error::QuizError;
pub use quiz::{QuestionGenerator, QuizProgress, QuizSession, QuizSummary};
pub use tasks::{ScheduledTask, TaskKind, TaskQueue};
pub use workflow::DrillWorkflow;
