use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::elements::ExitReason;
use crate::lifecycle::{LifecycleController, LifecycleState};

/// Cloneable, single-threaded handle to the page's lifecycle controller.
///
/// The page bootstrap builds one and hands clones to the drill and to the
/// unload hook. A call that arrives while another is still running (an unload
/// fired synchronously from inside `relaunch`, for instance) is skipped with a
/// log line instead of panicking.
#[derive(Clone)]
pub struct ScormHandle {
    inner: Rc<RefCell<LifecycleController>>,
}

impl ScormHandle {
    #[must_use]
    pub fn new(controller: LifecycleController) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    fn with<R>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut LifecycleController) -> R,
    ) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut controller) => Some(f(&mut *controller)),
            Err(_) => {
                warn!(operation, "lifecycle busy; call skipped");
                None
            }
        }
    }

    /// Registers the page-unload hook that closes an open attempt with
    /// exit reason `time-out`.
    pub fn install_unload_hook(&self) {
        let weak: Weak<RefCell<LifecycleController>> = Rc::downgrade(&self.inner);
        let Ok(controller) = self.inner.try_borrow() else {
            warn!("lifecycle busy; unload hook not installed");
            return;
        };
        let window = Rc::clone(controller.session().window());
        drop(controller);
        window.on_unload(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match inner.try_borrow_mut() {
                Ok(mut controller) => controller.on_page_unload(),
                Err(_) => debug!("unload during an in-flight lifecycle call; attempt already closing"),
            };
        }));
    }

    pub fn initialize(&self) -> bool {
        self.with("initialize", LifecycleController::initialize)
            .unwrap_or(false)
    }

    pub fn report_score(&self, correct: u32, total: u32) -> bool {
        self.with("report_score", |c| c.report_score(correct, total))
            .unwrap_or(false)
    }

    pub fn set_session_time(&self, elapsed_ms: i64) -> bool {
        self.with("set_session_time", |c| c.set_session_time(elapsed_ms))
            .unwrap_or(false)
    }

    pub fn finish_attempt(&self, exit: ExitReason) -> bool {
        self.with("finish_attempt", |c| c.finish_attempt(exit))
            .unwrap_or(false)
    }

    pub fn start_new_attempt(&self) -> bool {
        self.with("start_new_attempt", LifecycleController::start_new_attempt)
            .unwrap_or(false)
    }

    pub fn relaunch(&self) -> bool {
        self.with("relaunch", LifecycleController::relaunch)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.inner
            .try_borrow()
            .map_or(LifecycleState::Finishing, |controller| controller.state())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state() == LifecycleState::Active
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.inner
            .try_borrow()
            .map_or(0, |controller| controller.attempt_count())
    }
}

impl fmt::Debug for ScormHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(controller) => f.debug_tuple("ScormHandle").field(&*controller).finish(),
            Err(_) => f.write_str("ScormHandle(<busy>)"),
        }
    }
}
