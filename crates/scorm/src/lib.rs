#![forbid(unsafe_code)]

//! SCORM 1.2 runtime adapter.
//!
//! Locates the LMS-provided `API` object, drives the
//! initialize / report / finish lifecycle and converts the LMS string replies
//! into typed outcomes. Nothing here panics or propagates host failures to the
//! caller: a missing or misbehaving LMS only ever produces log lines.

pub mod accessor;
pub mod elements;
pub mod error;
pub mod handle;
pub mod host;
pub mod lifecycle;
pub mod locator;
pub mod memory;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use accessor::WriteOutcome;
pub use elements::{Element, ExitReason};
pub use error::{HostError, ScormError};
pub use handle::ScormHandle;
pub use host::{HostWindow, LmsApi, LmsMethod, ParentLink};
pub use lifecycle::{LifecycleController, LifecycleState, ScormOptions};
pub use locator::{FrameLocator, MAX_FRAME_DEPTH};
pub use session::SessionState;
