use chrono::{DateTime, Utc};
use drill_core::model::{AnswerCheck, Question, ScoreReport};

use super::progress::{QuizProgress, QuizSummary};
use crate::error::QuizError;

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

/// In-memory drill round.
///
/// Steps through its questions one at a time. Answering grades the current
/// question; [`advance`](Self::advance) moves on once it has been graded.
/// Blank input is reported back without consuming the question.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    /// One grade per answered question; blank input is never recorded.
    graded: Vec<AnswerCheck>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no questions are provided.
    pub fn new(questions: Vec<Question>, started_at: DateTime<Utc>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self {
            questions,
            current: 0,
            graded: Vec::new(),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        let correct = self
            .graded
            .iter()
            .filter(|&&check| check == AnswerCheck::Correct)
            .count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// The question on screen, or `None` once the round is complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current)
    }

    /// True once the current question has been graded and is waiting for
    /// [`advance`](Self::advance).
    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.graded.len() > self.current
    }

    /// Grades `raw` against the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` after the last question and
    /// `QuizError::AwaitingNext` if the current question is already graded.
    pub fn answer(&mut self, raw: &str) -> Result<AnswerCheck, QuizError> {
        let question = *self.current_question().ok_or(QuizError::Completed)?;
        if self.is_current_answered() {
            return Err(QuizError::AwaitingNext);
        }

        let check = question.check(raw);
        if check != AnswerCheck::Blank {
            self.graded.push(check);
        }
        Ok(check)
    }

    /// Moves past a graded question. Returns true when this completed the
    /// round.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if the round is over and
    /// `QuizError::AwaitingNext` if the current question has not been
    /// graded yet.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<bool, QuizError> {
        if self.is_complete() {
            return Err(QuizError::Completed);
        }
        if !self.is_current_answered() {
            return Err(QuizError::AwaitingNext);
        }

        self.current += 1;
        if self.current >= self.questions.len() {
            self.completed_at = Some(now);
            return Ok(true);
        }
        Ok(false)
    }

    /// Returns a summary of the current round progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.total();
        let current = u32::try_from(self.current).unwrap_or(u32::MAX);
        let percent = if self.is_complete() {
            100
        } else {
            current.saturating_mul(100) / total.max(1)
        };
        QuizProgress {
            position: current.saturating_add(1).min(total),
            total,
            answered: u32::try_from(self.graded.len()).unwrap_or(u32::MAX),
            percent,
            is_complete: self.is_complete(),
        }
    }

    /// Score and duration, once the round is complete.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        let completed_at = self.completed_at?;
        let report = ScoreReport::new(self.correct_count(), self.total()).ok()?;
        Some(QuizSummary {
            report,
            elapsed_ms: (completed_at - self.started_at).num_milliseconds().max(0),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
