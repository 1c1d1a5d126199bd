use std::cell::RefCell;
use std::rc::Rc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use drill_core::model::DrillSettings;
use drill_core::time::fixed_clock;
use scorm::memory::{MemoryApi, MemoryWindow};
use scorm::{LifecycleController, ScormHandle};
use services::DrillWorkflow;

use crate::context::{UiApp, build_app_context};
use crate::views::DrillView;

struct TestApp {
    drill: Rc<RefCell<DrillWorkflow>>,
}

impl UiApp for TestApp {
    fn drill(&self) -> Rc<RefCell<DrillWorkflow>> {
        Rc::clone(&self.drill)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Rc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn DrillHarness(props: ViewHarnessProps) -> Element {
    let app: Rc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { DrillView {} }
}

pub struct ViewHarness {
    pub drill: Rc<RefCell<DrillWorkflow>>,
    pub api: Option<Rc<MemoryApi>>,
}

impl ViewHarness {
    /// Mounts a fresh page over the shared workflow and returns its HTML.
    pub fn render(&self) -> String {
        let app = Rc::new(TestApp {
            drill: Rc::clone(&self.drill),
        });
        let mut dom = VirtualDom::new_with_props(DrillHarness, ViewHarnessProps { app });
        dom.rebuild_in_place();
        drive_dom(&mut dom);
        dioxus_ssr::render(&dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// A booted drill of `total` questions, all `3 × 3`.
pub fn setup_view_harness(total: u32, with_lms: bool) -> ViewHarness {
    let window = MemoryWindow::top();
    let api = with_lms.then(|| {
        let api = MemoryApi::new();
        window.set_api(api.clone());
        api
    });
    let lms = ScormHandle::new(LifecycleController::new(window));
    let settings = DrillSettings::new(total, 3, 3, 800).expect("valid settings");
    let mut drill =
        DrillWorkflow::new(settings, fixed_clock(), lms, 5).expect("questions generated");
    drill.boot();

    ViewHarness {
        drill: Rc::new(RefCell::new(drill)),
        api,
    }
}
