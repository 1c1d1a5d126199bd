//! Host contracts: the browsing-context tree and the LMS API object.
//!
//! Implementations live in [`crate::memory`] (tests, offline runs) and in
//! `crate::web` (the browser, wasm32 only).

use std::fmt;
use std::rc::Rc;

use crate::error::HostError;

/// Calls exposed by a SCORM 1.2 API object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LmsMethod {
    Initialize,
    SetValue,
    Commit,
    Finish,
    GetLastError,
}

impl LmsMethod {
    /// Method name on the host object.
    #[must_use]
    pub fn js_name(self) -> &'static str {
        match self {
            LmsMethod::Initialize => "LMSInitialize",
            LmsMethod::SetValue => "LMSSetValue",
            LmsMethod::Commit => "LMSCommit",
            LmsMethod::Finish => "LMSFinish",
            LmsMethod::GetLastError => "LMSGetLastError",
        }
    }
}

impl fmt::Display for LmsMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.js_name())
    }
}

/// The LMS-provided communication object.
///
/// Every call returns the raw string reply of the host. `Err` means the call
/// itself threw. Interpreting the `"true"`/`"false"` protocol is the job of
/// [`crate::accessor`]; raw replies must not travel further than that.
pub trait LmsApi {
    /// `LMSInitialize("")`.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host call throws.
    fn initialize(&self) -> Result<String, HostError>;

    /// `LMSSetValue(element, value)`.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host call throws.
    fn set_value(&self, element: &str, value: &str) -> Result<String, HostError>;

    /// `LMSCommit("")`.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host call throws.
    fn commit(&self) -> Result<String, HostError>;

    /// `LMSFinish("")`.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host call throws.
    fn finish(&self) -> Result<String, HostError>;

    /// `LMSGetLastError()`, the numeric code of the last failed call.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host call throws.
    fn last_error(&self) -> Result<String, HostError>;
}

/// Where a window's `parent` reference points.
pub enum ParentLink {
    /// No parent reference at all (detached or inaccessible).
    Detached,
    /// The window is its own parent: the top of the frame tree.
    Top,
    Frame(Rc<dyn HostWindow>),
}

impl fmt::Debug for ParentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentLink::Detached => f.write_str("Detached"),
            ParentLink::Top => f.write_str("Top"),
            ParentLink::Frame(_) => f.write_str("Frame(..)"),
        }
    }
}

/// A browsing context (window or frame) as seen from the SCO.
pub trait HostWindow {
    /// The `API` property of this window, if present and readable.
    fn lms_api(&self) -> Option<Rc<dyn LmsApi>>;

    fn parent(&self) -> ParentLink;

    /// The window that opened this one, for popup launches.
    fn opener(&self) -> Option<Rc<dyn HostWindow>>;

    /// Issue a reload of the top-level browsing context.
    ///
    /// # Errors
    ///
    /// Returns `HostError` when the top context is unreachable or refuses
    /// (e.g. cross-origin).
    fn reload_top(&self) -> Result<(), HostError>;

    /// Issue a reload of this browsing context.
    ///
    /// # Errors
    ///
    /// Returns `HostError` when the reload cannot be issued.
    fn reload(&self) -> Result<(), HostError>;

    /// Register a handler to run when the page is about to be discarded.
    fn on_unload(&self, handler: Box<dyn FnMut()>);
}
