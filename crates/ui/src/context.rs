use std::cell::RefCell;
use std::rc::Rc;

use services::DrillWorkflow;

/// What the composition root hands to the UI.
///
/// Single-threaded: the browser runs everything on one thread, and the LMS
/// objects behind the workflow are not `Send`.
pub trait UiApp {
    fn drill(&self) -> Rc<RefCell<DrillWorkflow>>;
}

#[derive(Clone)]
pub struct AppContext {
    drill: Rc<RefCell<DrillWorkflow>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Rc<dyn UiApp>) -> Self {
        Self { drill: app.drill() }
    }

    #[must_use]
    pub fn drill(&self) -> Rc<RefCell<DrillWorkflow>> {
        Rc::clone(&self.drill)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Rc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
