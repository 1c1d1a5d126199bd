//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{DrillSettingsError, ScoreError};

/// Errors emitted by the quiz round and the drill workflow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for the round")]
    Empty,
    #[error("round already completed")]
    Completed,
    #[error("current question already answered; waiting for the next one")]
    AwaitingNext,
    #[error("a relaunch is in progress")]
    Relaunching,
    #[error(transparent)]
    Settings(#[from] DrillSettingsError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
