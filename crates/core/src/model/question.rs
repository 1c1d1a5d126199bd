use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiplication prompt, `left × right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    left: u32,
    right: u32,
}

/// Result of checking a typed answer against a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerCheck {
    /// The input was empty after trimming; nothing was graded.
    Blank,
    Correct,
    /// Wrong or non-numeric input. Carries the expected product.
    Incorrect { expected: u64 },
}

impl Question {
    #[must_use]
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn left(&self) -> u32 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> u32 {
        self.right
    }

    #[must_use]
    pub fn product(&self) -> u64 {
        u64::from(self.left) * u64::from(self.right)
    }

    /// Grades raw user input.
    ///
    /// Surrounding whitespace is ignored. Input is read as a number, so
    /// `12.0` or `1.2e1` count as 12. Anything that is not a finite number
    /// is graded as incorrect rather than rejected.
    #[must_use]
    pub fn check(&self, raw: &str) -> AnswerCheck {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return AnswerCheck::Blank;
        }

        let expected = self.product();
        if parse_whole_number(trimmed) == Some(expected) {
            AnswerCheck::Correct
        } else {
            AnswerCheck::Incorrect { expected }
        }
    }
}

/// Non-negative whole number written as an integer or a decimal.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_whole_number(input: &str) -> Option<u64> {
    // Largest integer an f64 still represents exactly.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if let Ok(value) = input.parse::<u64>() {
        return Some(value);
    }
    let value = input.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_EXACT {
        return None;
    }
    Some(value as u64)
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.left, self.right)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_accepts_trimmed_product() {
        let question = Question::new(7, 8);
        assert_eq!(question.check(" 56 "), AnswerCheck::Correct);
    }

    #[test]
    fn check_blank_input_is_not_graded() {
        let question = Question::new(3, 4);
        assert_eq!(question.check("   "), AnswerCheck::Blank);
        assert_eq!(question.check(""), AnswerCheck::Blank);
    }

    #[test]
    fn check_wrong_and_garbage_input_are_incorrect() {
        let question = Question::new(3, 4);
        assert_eq!(question.check("11"), AnswerCheck::Incorrect { expected: 12 });
        assert_eq!(question.check("twelve"), AnswerCheck::Incorrect { expected: 12 });
        assert_eq!(question.check("-12"), AnswerCheck::Incorrect { expected: 12 });
    }

    #[test]
    fn check_accepts_whole_number_decimals() {
        let question = Question::new(3, 4);
        assert_eq!(question.check("12.0"), AnswerCheck::Correct);
        assert_eq!(question.check("12."), AnswerCheck::Correct);
        assert_eq!(question.check("1.2e1"), AnswerCheck::Correct);
        assert_eq!(question.check("12.5"), AnswerCheck::Incorrect { expected: 12 });
        assert_eq!(question.check("inf"), AnswerCheck::Incorrect { expected: 12 });
        assert_eq!(question.check("NaN"), AnswerCheck::Incorrect { expected: 12 });
    }

    #[test]
    fn display_uses_multiplication_sign() {
        assert_eq!(Question::new(2, 9).to_string(), "2 × 9");
    }
}
