//! Error types for the SCORM adapter.

use thiserror::Error;

/// Failure raised by the host while calling into it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostError {
    /// The host call threw; carries the rendered exception.
    #[error("host call threw: {0}")]
    Threw(String),

    /// A host object or method the call needs does not exist.
    #[error("{0} is not available")]
    Unavailable(&'static str),
}

/// Errors produced inside the lifecycle. Never surfaced past `ScormHandle`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScormError {
    #[error("no LMS API found in the frame hierarchy or opener")]
    ApiNotFound,

    #[error("LMS reporting disabled by launch options")]
    Disabled,

    #[error("LMSInitialize returned {reply:?}")]
    InitializeRejected { reply: String },

    #[error("session is not active")]
    NotActive,

    #[error(transparent)]
    Host(#[from] HostError),
}
