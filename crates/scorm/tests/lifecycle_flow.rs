use chrono::Duration;
use drill_core::time::fixed_clock;
use scorm::memory::{MemoryApi, MemoryWindow, ReloadTarget};
use scorm::{
    ExitReason, FrameLocator, LifecycleController, LifecycleState, LmsMethod, ScormHandle,
    SessionState,
};

fn writes_of(api: &MemoryApi, element: &str) -> Vec<String> {
    api.writes()
        .into_iter()
        .filter(|(name, _)| name == element)
        .map(|(_, value)| value)
        .collect()
}

#[test]
fn full_attempt_inside_nested_frames() {
    let chain = MemoryWindow::frame_chain(4);
    let api = MemoryApi::new();
    chain[3].set_api(api.clone());

    let mut controller = LifecycleController::new(chain[0].clone()).with_clock(fixed_clock());
    assert!(controller.initialize());

    controller.clock_mut().advance(Duration::seconds(95));
    assert!(controller.report_score(8, 10));
    assert!(controller.record_elapsed_session_time());
    assert!(controller.finish_attempt(ExitReason::Logout));

    assert_eq!(api.value("cmi.core.score.raw").as_deref(), Some("80"));
    assert_eq!(api.value("cmi.core.lesson_status").as_deref(), Some("passed"));
    assert_eq!(api.value("cmi.core.session_time").as_deref(), Some("00:01:35"));
    assert_eq!(api.value("cmi.core.exit").as_deref(), Some("logout"));
    assert_eq!(api.count(LmsMethod::Initialize), 1);
    assert_eq!(api.count(LmsMethod::Finish), 1);
    assert_eq!(controller.state(), LifecycleState::Closed);
}

#[test]
fn popup_launch_reports_through_the_opener() {
    let lms = MemoryWindow::top();
    let api = MemoryApi::new();
    lms.set_api(api.clone());
    let popup = MemoryWindow::top();
    popup.set_opener(&lms);

    let handle = ScormHandle::new(LifecycleController::new(popup));
    assert!(handle.initialize());
    assert!(handle.report_score(3, 10));
    assert!(handle.finish_attempt(ExitReason::Normal));

    assert_eq!(api.value("cmi.core.lesson_status").as_deref(), Some("failed"));
    assert_eq!(api.value("cmi.core.exit").as_deref(), Some(""));
}

#[test]
fn standalone_page_runs_every_operation_as_a_no_op() {
    let window = MemoryWindow::detached();
    let handle = ScormHandle::new(LifecycleController::new(window.clone()));
    handle.install_unload_hook();

    assert!(!handle.initialize());
    assert!(!handle.report_score(10, 10));
    assert!(!handle.set_session_time(1_000));
    assert!(!handle.finish_attempt(ExitReason::Logout));
    window.fire_unload();
    assert_eq!(handle.state(), LifecycleState::FailedInit);
}

#[test]
fn two_attempts_then_relaunch() {
    let window = MemoryWindow::top();
    let api = MemoryApi::new();
    window.set_api(api.clone());
    let handle = ScormHandle::new(LifecycleController::new(window.clone()));
    handle.install_unload_hook();

    assert!(handle.initialize());
    assert!(handle.report_score(10, 10));
    assert!(handle.start_new_attempt());
    assert_eq!(handle.attempt_count(), 2);
    assert!(handle.report_score(5, 10));

    assert!(handle.relaunch());
    assert_eq!(window.reloads(), vec![ReloadTarget::Top]);
    assert_eq!(api.count(LmsMethod::Finish), 2);
    assert_eq!(writes_of(&api, "cmi.core.exit"), vec!["", "logout", "", "logout"]);

    // The reload discards the page; the attempt is already closed.
    window.fire_unload();
    assert_eq!(api.count(LmsMethod::Finish), 2);
}

#[test]
fn custom_locator_depth_limits_the_search() {
    let chain = MemoryWindow::frame_chain(3);
    chain[2].set_api(MemoryApi::new());

    let session = SessionState::with_locator(chain[0].clone(), FrameLocator::with_max_depth(2));
    let mut controller = LifecycleController::from_session(session);
    assert!(!controller.initialize());
    assert_eq!(controller.state(), LifecycleState::FailedInit);

    let session = SessionState::with_locator(chain[0].clone(), FrameLocator::with_max_depth(3));
    let mut controller = LifecycleController::from_session(session);
    assert!(controller.initialize());
    assert_eq!(chain[2].api_lookups(), 1);
}
