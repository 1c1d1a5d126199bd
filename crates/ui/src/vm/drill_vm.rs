use drill_core::model::AnswerCheck;
use scorm::LifecycleState;
use services::DrillWorkflow;

use super::time_fmt::format_elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackTone {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub message: String,
    pub tone: FeedbackTone,
}

impl FeedbackVm {
    #[must_use]
    pub fn from_check(check: AnswerCheck) -> Self {
        match check {
            AnswerCheck::Blank => Self {
                message: "Type your answer to continue.".to_string(),
                tone: FeedbackTone::Error,
            },
            AnswerCheck::Correct => Self {
                message: "Correct!".to_string(),
                tone: FeedbackTone::Success,
            },
            AnswerCheck::Incorrect { expected } => Self {
                message: format!("Almost... the correct answer is {expected}."),
                tone: FeedbackTone::Error,
            },
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.tone {
            FeedbackTone::Success => "feedback feedback--success",
            FeedbackTone::Error => "feedback feedback--error",
        }
    }
}

/// Whether results are currently reaching an LMS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LmsStatus {
    Reporting,
    Offline,
    Closed,
}

impl LmsStatus {
    #[must_use]
    pub fn from_state(state: LifecycleState) -> Self {
        match state {
            LifecycleState::Active => Self::Reporting,
            LifecycleState::Finishing | LifecycleState::Closed => Self::Closed,
            LifecycleState::Uninitialized
            | LifecycleState::Initializing
            | LifecycleState::FailedInit => Self::Offline,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Reporting => "Reporting to LMS",
            Self::Offline => "Offline: results are not reported",
            Self::Closed => "LMS session closed",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Reporting => "lms-badge lms-badge--on",
            Self::Offline | Self::Closed => "lms-badge lms-badge--off",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub hits: u32,
    pub total: u32,
    pub score_label: String,
    pub passed: bool,
    pub duration_label: String,
}

/// Render snapshot of the drill page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrillVm {
    pub progress_label: String,
    pub progress_percent: u32,
    pub question: Option<String>,
    pub feedback: Option<FeedbackVm>,
    pub awaiting_next: bool,
    pub summary: Option<SummaryVm>,
    pub lms_status: LmsStatus,
    pub attempt: u32,
    pub relaunching: bool,
}

impl DrillVm {
    #[must_use]
    pub fn from_workflow(drill: &DrillWorkflow) -> Self {
        let quiz = drill.quiz();
        let progress = quiz.progress();
        let summary = quiz.summary().map(|summary| SummaryVm {
            hits: summary.correct(),
            total: summary.total(),
            score_label: format!("{}%", summary.score_percent()),
            passed: summary.report.passed(),
            duration_label: format_elapsed(summary.elapsed_ms),
        });

        Self {
            progress_label: progress.label(),
            progress_percent: progress.percent,
            question: quiz.current_question().map(ToString::to_string),
            feedback: drill.feedback().map(FeedbackVm::from_check),
            awaiting_next: drill.is_awaiting_next(),
            summary,
            lms_status: LmsStatus::from_state(drill.lms().state()),
            attempt: drill.lms().attempt_count(),
            relaunching: drill.is_relaunching(),
        }
    }

    #[must_use]
    pub fn progress_style(&self) -> String {
        format!("width: {}%;", self.progress_percent)
    }
}
