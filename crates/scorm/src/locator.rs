//! Bounded search for the LMS `API` object.

use std::rc::Rc;

use crate::host::{HostWindow, LmsApi, ParentLink};

/// Number of windows examined per walk, starting window included.
pub const MAX_FRAME_DEPTH: usize = 7;

/// Walks the parent chain (then the opener's chain) looking for `API`.
///
/// The walk is bounded so a malformed frame tree cannot loop forever. The
/// opener fallback covers SCOs launched in a popup; it is a heuristic and
/// gives no guarantees for cross-origin trees, whose windows simply read as
/// having no API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLocator {
    max_depth: usize,
}

impl Default for FrameLocator {
    fn default() -> Self {
        Self {
            max_depth: MAX_FRAME_DEPTH,
        }
    }
}

impl FrameLocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A locator examining at most `max_depth` windows per walk.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the first API found, or `None`. Absence is not an error.
    #[must_use]
    pub fn locate(&self, start: &Rc<dyn HostWindow>) -> Option<Rc<dyn LmsApi>> {
        self.search_ancestry(start).or_else(|| {
            start
                .opener()
                .and_then(|opener| self.search_ancestry(&opener))
        })
    }

    fn search_ancestry(&self, start: &Rc<dyn HostWindow>) -> Option<Rc<dyn LmsApi>> {
        let mut current = Rc::clone(start);
        for _ in 0..self.max_depth {
            if let Some(api) = current.lms_api() {
                return Some(api);
            }
            current = match current.parent() {
                ParentLink::Frame(parent) => parent,
                ParentLink::Top | ParentLink::Detached => return None,
            };
        }
        None
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
