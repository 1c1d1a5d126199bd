use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum raw score (inclusive) that counts as a pass.
pub const PASS_THRESHOLD: u32 = 70;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("total question count must be > 0")]
    EmptyTotal,

    #[error("correct count ({correct}) exceeds total ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

//
// ─── LESSON STATUS ─────────────────────────────────────────────────────────────
//

/// Completion vocabulary understood by the LMS data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonStatus {
    Passed,
    Completed,
    Failed,
    Incomplete,
    Browsed,
    NotAttempted,
}

impl LessonStatus {
    /// Wire value written to the data model.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LessonStatus::Passed => "passed",
            LessonStatus::Completed => "completed",
            LessonStatus::Failed => "failed",
            LessonStatus::Incomplete => "incomplete",
            LessonStatus::Browsed => "browsed",
            LessonStatus::NotAttempted => "not attempted",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SCORE REPORT ──────────────────────────────────────────────────────────────
//

/// Outcome of a finished drill, derived from correct/total counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    correct: u32,
    total: u32,
}

impl ScoreReport {
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyTotal` when `total` is zero and
    /// `ScoreError::CorrectExceedsTotal` when `correct > total`.
    pub fn new(correct: u32, total: u32) -> Result<Self, ScoreError> {
        if total == 0 {
            return Err(ScoreError::EmptyTotal);
        }
        if correct > total {
            return Err(ScoreError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self { correct, total })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Percentage score rounded half-up, in `0..=100`.
    #[must_use]
    pub fn raw(&self) -> u32 {
        let correct = u64::from(self.correct);
        let total = u64::from(self.total);
        let rounded = (200 * correct + total) / (2 * total);
        // Bounded by 100 because correct <= total.
        u32::try_from(rounded.min(100)).unwrap_or(100)
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.raw() >= PASS_THRESHOLD
    }

    #[must_use]
    pub fn status(&self) -> LessonStatus {
        if self.passed() {
            LessonStatus::Passed
        } else {
            LessonStatus::Failed
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seventy_percent_is_a_pass() {
        let report = ScoreReport::new(7, 10).unwrap();
        assert_eq!(report.raw(), 70);
        assert_eq!(report.status(), LessonStatus::Passed);
    }

    #[test]
    fn sixty_percent_fails() {
        let report = ScoreReport::new(6, 10).unwrap();
        assert_eq!(report.raw(), 60);
        assert_eq!(report.status(), LessonStatus::Failed);
    }

    #[test]
    fn extremes() {
        assert_eq!(ScoreReport::new(0, 10).unwrap().raw(), 0);
        assert_eq!(ScoreReport::new(0, 10).unwrap().status(), LessonStatus::Failed);
        assert_eq!(ScoreReport::new(10, 10).unwrap().raw(), 100);
        assert_eq!(ScoreReport::new(10, 10).unwrap().status(), LessonStatus::Passed);
    }

    #[test]
    fn rounds_half_up() {
        // 2/3 = 66.67 -> 67, 1/8 = 12.5 -> 13
        assert_eq!(ScoreReport::new(2, 3).unwrap().raw(), 67);
        assert_eq!(ScoreReport::new(1, 8).unwrap().raw(), 13);
    }

    #[test]
    fn rejects_invalid_counts() {
        assert_eq!(ScoreReport::new(0, 0).unwrap_err(), ScoreError::EmptyTotal);
        assert_eq!(
            ScoreReport::new(11, 10).unwrap_err(),
            ScoreError::CorrectExceedsTotal {
                correct: 11,
                total: 10
            }
        );
    }

    #[test]
    fn status_wire_values() {
        assert_eq!(LessonStatus::Incomplete.as_str(), "incomplete");
        assert_eq!(LessonStatus::NotAttempted.as_str(), "not attempted");
    }

    proptest! {
        #[test]
        fn raw_stays_in_range(total in 1u32..10_000, seed in any::<u32>()) {
            let correct = seed % (total + 1);
            let report = ScoreReport::new(correct, total).unwrap();
            prop_assert!(report.raw() <= 100);
            prop_assert_eq!(report.passed(), report.raw() >= PASS_THRESHOLD);
        }
    }
}
