//! SCORM session lifecycle: initialize, report, finish, relaunch.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use drill_core::Clock;
use drill_core::model::{LessonStatus, ScoreReport};
use drill_core::time::format_session_time;
use tracing::{debug, error, info, warn};

use crate::accessor::{self, WriteOutcome};
use crate::elements::{Element, ExitReason};
use crate::error::ScormError;
use crate::host::HostWindow;
use crate::session::SessionState;

/// Where the controller is in the attempt lifecycle.
///
/// `Initializing` and `Finishing` are only observable from inside host calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Initializing,
    Active,
    Finishing,
    Closed,
    /// The LMS was absent or declined; the drill runs unreported.
    FailedInit,
}

/// Launch-time switches for the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScormOptions {
    /// When false the frame tree is never searched and every attempt runs
    /// unreported.
    pub enabled: bool,
}

impl Default for ScormOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Translates drill events into LMS data-model traffic.
///
/// Every operation degrades to a logged no-op when the LMS is missing,
/// declines, or throws. Return values say whether the work was carried out;
/// callers are free to ignore them.
pub struct LifecycleController {
    session: SessionState,
    state: LifecycleState,
    options: ScormOptions,
    clock: Clock,
    attempt_started_at: Option<DateTime<Utc>>,
    session_time_reported: bool,
}

impl LifecycleController {
    #[must_use]
    pub fn new(window: Rc<dyn HostWindow>) -> Self {
        Self::from_session(SessionState::new(window))
    }

    #[must_use]
    pub fn from_session(session: SessionState) -> Self {
        Self {
            session,
            state: LifecycleState::Uninitialized,
            options: ScormOptions::default(),
            clock: Clock::default_clock(),
            attempt_started_at: None,
            session_time_reported: false,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ScormOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.session.attempt_count()
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn options(&self) -> ScormOptions {
        self.options
    }

    /// Fixed clocks can be moved forward to simulate elapsed time.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Opens an attempt with the LMS.
    ///
    /// Re-initializing an active attempt is allowed and counts as a new
    /// attempt when the LMS accepts it.
    pub fn initialize(&mut self) -> bool {
        self.state = LifecycleState::Initializing;
        match self.try_initialize() {
            Ok(()) => true,
            Err(err) => {
                self.session.mark_uninitialized();
                self.state = LifecycleState::FailedInit;
                warn!(error = %err, "LMS session not started; drill continues unreported");
                false
            }
        }
    }

    fn try_initialize(&mut self) -> Result<(), ScormError> {
        if !self.options.enabled {
            return Err(ScormError::Disabled);
        }
        let api = self.session.current_api().ok_or(ScormError::ApiNotFound)?;
        accessor::initialize(&*api)?;

        self.session.mark_initialized();
        self.state = LifecycleState::Active;
        self.attempt_started_at = Some(self.clock.now());
        self.session_time_reported = false;

        let _ = accessor::set_value(
            &self.session,
            Element::LessonStatus,
            LessonStatus::Incomplete.as_str(),
        );
        let _ = accessor::set_value(&self.session, Element::Exit, ExitReason::Normal.as_str());
        let _ = accessor::commit(&self.session);
        info!(attempt = self.session.attempt_count(), "LMS session initialized");
        Ok(())
    }

    fn require_active(&self, operation: &'static str) -> bool {
        let active = self.is_active();
        if !active {
            debug!(operation, state = ?self.state, "skipped: LMS session not active");
        }
        active
    }

    /// Writes `cmi.core.lesson_status` without committing.
    pub fn set_lesson_status(&mut self, status: LessonStatus) -> bool {
        if !self.require_active("set_lesson_status") {
            return false;
        }
        let _ = accessor::set_value(&self.session, Element::LessonStatus, status.as_str());
        true
    }

    /// Reports min/max/raw score and passed/failed status, then commits.
    pub fn report_score(&mut self, correct: u32, total: u32) -> bool {
        if !self.require_active("report_score") {
            return false;
        }
        let report = match ScoreReport::new(correct, total) {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, correct, total, "score not reported");
                return false;
            }
        };

        let raw = report.raw().to_string();
        let status = report.status();
        for (element, value) in [
            (Element::ScoreMin, "0"),
            (Element::ScoreMax, "100"),
            (Element::ScoreRaw, raw.as_str()),
        ] {
            let _ = accessor::set_value(&self.session, element, value);
        }
        let _ = self.set_lesson_status(status);
        let _ = accessor::commit(&self.session);
        info!(score = report.raw(), %status, "score reported");
        true
    }

    /// Writes `cmi.core.session_time` as `HH:MM:SS`.
    pub fn set_session_time(&mut self, elapsed_ms: i64) -> bool {
        if !self.require_active("set_session_time") {
            return false;
        }
        let value = format_session_time(elapsed_ms);
        let outcome = accessor::set_value(&self.session, Element::SessionTime, &value);
        self.session_time_reported = outcome != WriteOutcome::Skipped;
        true
    }

    /// Writes the time elapsed since this attempt was initialized.
    pub fn record_elapsed_session_time(&mut self) -> bool {
        let Some(started_at) = self.attempt_started_at else {
            return false;
        };
        let elapsed = self.clock.millis_since(started_at);
        self.set_session_time(elapsed)
    }

    /// Closes the attempt: exit reason, commit, `LMSFinish`.
    ///
    /// The cached API is dropped afterwards so the next [`initialize`]
    /// searches the frame tree again. Returns false when not active or when
    /// the commit or finish call threw.
    ///
    /// [`initialize`]: Self::initialize
    pub fn finish_attempt(&mut self, exit: ExitReason) -> bool {
        if !self.require_active("finish_attempt") {
            return false;
        }
        if !self.session_time_reported {
            let _ = self.record_elapsed_session_time();
        }
        self.state = LifecycleState::Finishing;

        let _ = accessor::set_value(&self.session, Element::Exit, exit.as_str());
        let commit = accessor::commit(&self.session);
        let finish = match self.session.writable_api().cloned() {
            Some(api) => accessor::finish(&*api),
            None => Err(ScormError::NotActive),
        };

        self.session.clear();
        self.attempt_started_at = None;
        self.state = LifecycleState::Closed;

        match finish {
            Ok(()) if !commit.is_failed() => {
                info!(exit = exit.as_str(), "LMS session finished");
                true
            }
            Ok(()) => {
                warn!(exit = exit.as_str(), "LMS session finished after a failed commit");
                false
            }
            Err(err) => {
                error!(error = %err, "LMSFinish failed");
                false
            }
        }
    }

    /// Finishes an active attempt (exit `logout`) and initializes a fresh one.
    pub fn start_new_attempt(&mut self) -> bool {
        if self.is_active() {
            let _ = self.finish_attempt(ExitReason::Logout);
        }
        self.initialize()
    }

    /// Finishes the attempt and reloads the page.
    ///
    /// Tries the top-level context first and falls back to the current one.
    /// True means a reload was issued; the page is expected to go away.
    pub fn relaunch(&mut self) -> bool {
        let _ = self.finish_attempt(ExitReason::Logout);
        let window = Rc::clone(self.session.window());

        match window.reload_top() {
            Ok(()) => {
                info!("relaunching top-level context");
                true
            }
            Err(err) => {
                warn!(error = %err, "top-level reload refused; reloading current context");
                match window.reload() {
                    Ok(()) => true,
                    Err(err) => {
                        error!(error = %err, "relaunch failed; no reload issued");
                        false
                    }
                }
            }
        }
    }

    /// Called when the page is being discarded.
    pub fn on_page_unload(&mut self) {
        if self.is_active() {
            let _ = self.finish_attempt(ExitReason::TimeOut);
        }
    }
}

impl fmt::Debug for LifecycleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleController")
            .field("state", &self.state)
            .field("session", &self.session)
            .field("options", &self.options)
            .field("attempt_started_at", &self.attempt_started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
