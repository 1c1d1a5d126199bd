//! Data-model elements written by the adapter and their value vocabularies.

use std::fmt;

/// `cmi.core.*` elements this SCO writes. The names are wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    LessonStatus,
    ScoreMin,
    ScoreMax,
    ScoreRaw,
    SessionTime,
    Exit,
}

impl Element {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Element::LessonStatus => "cmi.core.lesson_status",
            Element::ScoreMin => "cmi.core.score.min",
            Element::ScoreMax => "cmi.core.score.max",
            Element::ScoreRaw => "cmi.core.score.raw",
            Element::SessionTime => "cmi.core.session_time",
            Element::Exit => "cmi.core.exit",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values accepted by `cmi.core.exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitReason {
    /// Empty string: clears the field.
    Normal,
    #[default]
    Logout,
    TimeOut,
    Suspend,
}

impl ExitReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExitReason::Normal => "",
            ExitReason::Logout => "logout",
            ExitReason::TimeOut => "time-out",
            ExitReason::Suspend => "suspend",
        }
    }
}
