//! Per-page SCORM session state.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::host::{HostWindow, LmsApi};
use crate::locator::FrameLocator;

/// Cached API handle, initialized flag and attempt counter for one page.
///
/// Owned by the lifecycle controller; the page bootstrap constructs exactly
/// one. The located API (or its absence) is cached until [`clear`] runs, so
/// the frame tree is searched at most once per attempt.
///
/// [`clear`]: SessionState::clear
pub struct SessionState {
    window: Rc<dyn HostWindow>,
    locator: FrameLocator,
    api: Option<Rc<dyn LmsApi>>,
    searched: bool,
    initialized: bool,
    attempt_count: u32,
}

impl SessionState {
    #[must_use]
    pub fn new(window: Rc<dyn HostWindow>) -> Self {
        Self::with_locator(window, FrameLocator::default())
    }

    #[must_use]
    pub fn with_locator(window: Rc<dyn HostWindow>, locator: FrameLocator) -> Self {
        Self {
            window,
            locator,
            api: None,
            searched: false,
            initialized: false,
            attempt_count: 0,
        }
    }

    /// The located API, searching the frame tree on first access only.
    pub fn current_api(&mut self) -> Option<Rc<dyn LmsApi>> {
        if !self.searched {
            self.searched = true;
            self.api = self.locator.locate(&self.window);
            debug!(found = self.api.is_some(), "searched frame tree for LMS API");
        }
        self.api.clone()
    }

    /// The cached API, without triggering a search.
    #[must_use]
    pub fn cached_api(&self) -> Option<&Rc<dyn LmsApi>> {
        self.api.as_ref()
    }

    /// The API to write through, only while a session is open.
    #[must_use]
    pub fn writable_api(&self) -> Option<&Rc<dyn LmsApi>> {
        if self.initialized {
            self.api.as_ref()
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    #[must_use]
    pub fn window(&self) -> &Rc<dyn HostWindow> {
        &self.window
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
        self.attempt_count = self.attempt_count.saturating_add(1);
    }

    pub(crate) fn mark_uninitialized(&mut self) {
        self.initialized = false;
    }

    /// Drops the cached API and closes the session. The attempt counter is
    /// kept; the next [`current_api`](Self::current_api) searches again.
    pub fn clear(&mut self) {
        self.api = None;
        self.searched = false;
        self.initialized = false;
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("has_api", &self.api.is_some())
            .field("searched", &self.searched)
            .field("initialized", &self.initialized)
            .field("attempt_count", &self.attempt_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryApi, MemoryWindow};

    #[test]
    fn api_is_searched_once_and_cached() {
        let window = MemoryWindow::top();
        window.set_api(MemoryApi::new());
        let mut session = SessionState::new(window.clone());

        assert!(session.current_api().is_some());
        assert!(session.current_api().is_some());
        assert_eq!(window.api_lookups(), 1);
    }

    #[test]
    fn missing_api_is_cached_too() {
        let window = MemoryWindow::top();
        let mut session = SessionState::new(window.clone());

        assert!(session.current_api().is_none());
        window.set_api(MemoryApi::new());
        assert!(session.current_api().is_none());
        assert_eq!(window.api_lookups(), 1);
    }

    #[test]
    fn clear_forces_a_new_search_and_keeps_attempts() {
        let window = MemoryWindow::top();
        window.set_api(MemoryApi::new());
        let mut session = SessionState::new(window.clone());
        let _ = session.current_api();
        session.mark_initialized();

        session.clear();
        assert!(!session.is_initialized());
        assert!(session.cached_api().is_none());
        assert_eq!(session.attempt_count(), 1);

        let _ = session.current_api();
        assert_eq!(window.api_lookups(), 2);
    }

    #[test]
    fn writable_api_requires_initialization() {
        let window = MemoryWindow::top();
        window.set_api(MemoryApi::new());
        let mut session = SessionState::new(window);
        let _ = session.current_api();

        assert!(session.writable_api().is_none());
        session.mark_initialized();
        assert!(session.writable_api().is_some());
    }
}
