use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DrillSettingsError {
    #[error("question count must be between 1 and 100")]
    InvalidQuestionCount,

    #[error("factors must be >= 1")]
    InvalidFactor,

    #[error("minimum factor must be <= maximum factor")]
    InvalidFactorBounds,

    #[error("advance delay must be <= 10000 ms")]
    InvalidAdvanceDelay,

    #[error("launch parameter `{key}` has an unparsable value: {raw}")]
    UnparsableParam { key: String, raw: String },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Shape of a drill round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillSettings {
    total_questions: u32,
    min_factor: u32,
    max_factor: u32,
    advance_delay_ms: u32,
}

impl Default for DrillSettings {
    /// Ten questions over the 1–9 times tables, 800 ms between questions.
    fn default() -> Self {
        Self {
            total_questions: 10,
            min_factor: 1,
            max_factor: 9,
            advance_delay_ms: 800,
        }
    }
}

impl DrillSettings {
    /// # Errors
    ///
    /// Returns `DrillSettingsError` if any value is out of range.
    pub fn new(
        total_questions: u32,
        min_factor: u32,
        max_factor: u32,
        advance_delay_ms: u32,
    ) -> Result<Self, DrillSettingsError> {
        if !(1..=100).contains(&total_questions) {
            return Err(DrillSettingsError::InvalidQuestionCount);
        }
        if min_factor == 0 || max_factor == 0 {
            return Err(DrillSettingsError::InvalidFactor);
        }
        if min_factor > max_factor {
            return Err(DrillSettingsError::InvalidFactorBounds);
        }
        if advance_delay_ms > 10_000 {
            return Err(DrillSettingsError::InvalidAdvanceDelay);
        }

        Ok(Self {
            total_questions,
            min_factor,
            max_factor,
            advance_delay_ms,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn min_factor(&self) -> u32 {
        self.min_factor
    }

    #[must_use]
    pub fn max_factor(&self) -> u32 {
        self.max_factor
    }

    #[must_use]
    pub fn advance_delay_ms(&self) -> u32 {
        self.advance_delay_ms
    }

    #[must_use]
    pub fn advance_delay(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(i64::from(self.advance_delay_ms))
    }
}

//
// ─── LAUNCH OPTIONS ────────────────────────────────────────────────────────────
//

/// Options read from the launch URL's query string.
///
/// Recognised keys: `questions`, `min`, `max`, `delay`, `lms` (`off` disables
/// reporting). Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub settings: DrillSettings,
    pub lms_enabled: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            settings: DrillSettings::default(),
            lms_enabled: true,
        }
    }
}

impl LaunchOptions {
    /// Parses launch options, never failing.
    ///
    /// Problems are returned alongside the result; any invalid value falls
    /// back to its default so the drill always starts.
    #[must_use]
    pub fn from_url(url: &Url) -> (Self, Vec<DrillSettingsError>) {
        let defaults = DrillSettings::default();
        let mut problems = Vec::new();
        let mut total = defaults.total_questions;
        let mut min = defaults.min_factor;
        let mut max = defaults.max_factor;
        let mut delay = defaults.advance_delay_ms;
        let mut lms_enabled = true;

        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                "questions" => &mut total,
                "min" => &mut min,
                "max" => &mut max,
                "delay" => &mut delay,
                "lms" => {
                    lms_enabled = !matches!(value.as_ref(), "off" | "false" | "0");
                    continue;
                }
                _ => continue,
            };
            match value.trim().parse::<u32>() {
                Ok(parsed) => *slot = parsed,
                Err(_) => problems.push(DrillSettingsError::UnparsableParam {
                    key: key.to_string(),
                    raw: value.to_string(),
                }),
            }
        }

        let settings = match DrillSettings::new(total, min, max, delay) {
            Ok(settings) => settings,
            Err(err) => {
                problems.push(err);
                defaults
            }
        };

        (
            Self {
                settings,
                lms_enabled,
            },
            problems,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> (LaunchOptions, Vec<DrillSettingsError>) {
        LaunchOptions::from_url(&Url::parse(raw).unwrap())
    }

    #[test]
    fn defaults_match_classic_drill() {
        let settings = DrillSettings::default();
        assert_eq!(settings.total_questions(), 10);
        assert_eq!(settings.min_factor(), 1);
        assert_eq!(settings.max_factor(), 9);
        assert_eq!(settings.advance_delay_ms(), 800);
    }

    #[test]
    fn new_rejects_bad_values() {
        assert_eq!(
            DrillSettings::new(0, 1, 9, 800).unwrap_err(),
            DrillSettingsError::InvalidQuestionCount
        );
        assert_eq!(
            DrillSettings::new(10, 0, 9, 800).unwrap_err(),
            DrillSettingsError::InvalidFactor
        );
        assert_eq!(
            DrillSettings::new(10, 9, 2, 800).unwrap_err(),
            DrillSettingsError::InvalidFactorBounds
        );
        assert_eq!(
            DrillSettings::new(10, 1, 9, 60_000).unwrap_err(),
            DrillSettingsError::InvalidAdvanceDelay
        );
    }

    #[test]
    fn launch_options_without_query_are_defaults() {
        let (options, problems) = parse("https://lms.example/sco/index.html");
        assert_eq!(options, LaunchOptions::default());
        assert!(problems.is_empty());
    }

    #[test]
    fn launch_options_apply_overrides() {
        let (options, problems) =
            parse("https://lms.example/index.html?questions=12&min=2&max=12&delay=0&lms=off");
        assert!(problems.is_empty(), "{problems:?}");
        assert_eq!(options.settings, DrillSettings::new(12, 2, 12, 0).unwrap());
        assert!(!options.lms_enabled);
    }

    #[test]
    fn launch_options_fall_back_on_invalid_values() {
        let (options, problems) = parse("https://lms.example/index.html?questions=abc&min=9&max=3");
        assert_eq!(options.settings, DrillSettings::default());
        assert!(options.lms_enabled);
        assert_eq!(problems.len(), 2);
        assert!(matches!(
            problems[0],
            DrillSettingsError::UnparsableParam { ref key, .. } if key == "questions"
        ));
        assert_eq!(problems[1], DrillSettingsError::InvalidFactorBounds);
    }
}
