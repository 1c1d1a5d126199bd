//! Failure-tolerant access to the LMS data model.
//!
//! This is the only place that interprets the LMS string-boolean replies.
//! Callers get a [`WriteOutcome`] or a [`ScormError`]; nothing here panics or
//! forwards a host exception.

use tracing::{debug, error, warn};

use crate::elements::Element;
use crate::error::ScormError;
use crate::host::LmsApi;
use crate::session::SessionState;

/// Result of a single data-model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The session was not open; the host was never contacted.
    Skipped,
    /// The LMS replied `"true"`.
    Accepted,
    /// The LMS replied with anything other than `"true"`.
    Rejected,
    /// The host call threw.
    Failed,
}

impl WriteOutcome {
    #[must_use]
    pub fn is_failed(self) -> bool {
        matches!(self, WriteOutcome::Failed)
    }
}

fn is_true(reply: &str) -> bool {
    reply == "true"
}

fn last_error_code(api: &dyn LmsApi) -> String {
    api.last_error().unwrap_or_else(|_| "unknown".to_string())
}

/// Writes one element. Silently skipped unless the session is open.
pub fn set_value(session: &SessionState, element: Element, value: &str) -> WriteOutcome {
    let Some(api) = session.writable_api() else {
        return WriteOutcome::Skipped;
    };

    match api.set_value(element.as_str(), value) {
        Ok(reply) if is_true(&reply) => {
            debug!(%element, value, "LMSSetValue accepted");
            WriteOutcome::Accepted
        }
        Ok(reply) => {
            let code = last_error_code(&**api);
            warn!(%element, value, %reply, %code, "LMSSetValue rejected");
            WriteOutcome::Rejected
        }
        Err(err) => {
            error!(%element, error = %err, "LMSSetValue failed");
            WriteOutcome::Failed
        }
    }
}

/// Flushes pending writes. A non-`"true"` reply is logged but tolerated.
pub fn commit(session: &SessionState) -> WriteOutcome {
    let Some(api) = session.writable_api() else {
        return WriteOutcome::Skipped;
    };

    match api.commit() {
        Ok(reply) if is_true(&reply) => WriteOutcome::Accepted,
        Ok(reply) => {
            debug!(%reply, "LMSCommit did not return true");
            WriteOutcome::Rejected
        }
        Err(err) => {
            error!(error = %err, "LMSCommit failed");
            WriteOutcome::Failed
        }
    }
}

/// `LMSInitialize("")`, mapped to a typed result.
pub(crate) fn initialize(api: &dyn LmsApi) -> Result<(), ScormError> {
    let reply = api.initialize()?;
    if is_true(&reply) {
        Ok(())
    } else {
        Err(ScormError::InitializeRejected { reply })
    }
}

/// `LMSFinish("")`. Only a thrown call counts as failure.
pub(crate) fn finish(api: &dyn LmsApi) -> Result<(), ScormError> {
    let reply = api.finish()?;
    if !is_true(&reply) {
        debug!(%reply, "LMSFinish did not return true");
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
