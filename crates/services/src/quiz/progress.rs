use drill_core::model::ScoreReport;

/// Aggregated view of round progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the question on screen, capped at `total`.
    pub position: u32,
    pub total: u32,
    pub answered: u32,
    /// Width of the progress bar: share of questions already left behind.
    pub percent: u32,
    pub is_complete: bool,
}

impl QuizProgress {
    /// `Question k of N`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Question {} of {}", self.position, self.total)
    }
}

/// End-of-round figures shown on the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub report: ScoreReport,
    pub elapsed_ms: i64,
}

impl QuizSummary {
    #[must_use]
    pub fn correct(&self) -> u32 {
        self.report.correct()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.report.total()
    }

    #[must_use]
    pub fn score_percent(&self) -> u32 {
        self.report.raw()
    }
}
