use std::cell::RefCell;
use std::rc::Rc;

use dioxus::LaunchBuilder;
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use drill_core::model::LaunchOptions;
use scorm::{HostWindow, LifecycleController, ScormHandle, ScormOptions};
use services::{Clock, DrillWorkflow, QuizError};
use tracing::{error, info, warn};
use ui::{App, UiApp, build_app_context};
use url::Url;

struct BrowserApp {
    drill: Rc<RefCell<DrillWorkflow>>,
}

impl UiApp for BrowserApp {
    fn drill(&self) -> Rc<RefCell<DrillWorkflow>> {
        Rc::clone(&self.drill)
    }
}

/// The page's own window and its `location.href`.
#[cfg(target_arch = "wasm32")]
fn browser_window() -> Option<(Rc<dyn HostWindow>, Option<String>)> {
    let window = scorm::web::BrowserWindow::current()?;
    let href = window.href();
    Some((Rc::new(window), href))
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_window() -> Option<(Rc<dyn HostWindow>, Option<String>)> {
    None
}

fn launch_options(href: Option<&str>) -> LaunchOptions {
    let Some(href) = href else {
        return LaunchOptions::default();
    };
    match Url::parse(href) {
        Ok(url) => {
            let (options, problems) = LaunchOptions::from_url(&url);
            for problem in &problems {
                warn!(error = %problem, "launch parameter ignored");
            }
            options
        }
        Err(err) => {
            warn!(error = %err, href, "launch URL unparsable; using defaults");
            LaunchOptions::default()
        }
    }
}

/// Page bootstrap: the one place that constructs the LMS session.
fn bootstrap() -> Result<Rc<dyn UiApp>, QuizError> {
    let (window, href) = browser_window().unwrap_or_else(|| {
        warn!("no browser window; running unreported");
        let window: Rc<dyn HostWindow> = scorm::memory::MemoryWindow::detached();
        (window, None)
    });
    let options = launch_options(href.as_deref());

    let clock = Clock::default_clock();
    let controller = LifecycleController::new(window)
        .with_options(ScormOptions {
            enabled: options.lms_enabled,
        })
        .with_clock(clock);
    let lms = ScormHandle::new(controller);
    lms.install_unload_hook();

    let seed = clock.now().timestamp_millis().unsigned_abs();
    let mut drill = DrillWorkflow::new(options.settings, clock, lms, seed)?;
    let reporting = drill.boot();
    info!(reporting, lms_enabled = options.lms_enabled, "page ready");

    Ok(Rc::new(BrowserApp {
        drill: Rc::new(RefCell::new(drill)),
    }))
}

#[component]
fn Root() -> Element {
    let booted = use_hook(|| match bootstrap() {
        Ok(app) => {
            provide_context(build_app_context(&app));
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "drill could not start");
            Err(err.to_string())
        }
    });

    match booted {
        Ok(()) => rsx! { App {} },
        Err(message) => rsx! {
            div { class: "fatal",
                h1 { "Something went wrong" }
                p { "{message}" }
            }
        },
    }
}

fn main() {
    // A second init (from the launcher) is a no-op.
    let _ = dioxus::logger::init(Level::INFO);
    LaunchBuilder::web().launch(Root);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_href_falls_back_to_defaults() {
        assert_eq!(launch_options(Some("not a url")), LaunchOptions::default());
        assert_eq!(launch_options(None), LaunchOptions::default());
    }

    #[test]
    fn query_overrides_are_applied() {
        let options = launch_options(Some(
            "https://lms.example/sco/index.html?questions=5&max=12&lms=off",
        ));
        assert_eq!(options.settings.total_questions(), 5);
        assert_eq!(options.settings.max_factor(), 12);
        assert!(!options.lms_enabled);
    }

    #[test]
    fn bootstrap_without_a_browser_runs_unreported() {
        let app = bootstrap().unwrap();
        let drill = app.drill();
        let drill = drill.borrow();
        assert!(!drill.lms().is_active());
        assert!(drill.quiz().current_question().is_some());
    }
}
