use chrono::Duration;

use super::test_harness::setup_view_harness;

fn finish_round(harness: &super::test_harness::ViewHarness, answers: &[&str]) {
    let mut drill = harness.drill.borrow_mut();
    for answer in answers {
        drill.submit(answer).unwrap();
        drill.clock_mut().advance(Duration::seconds(1));
        drill.tick();
    }
}

#[test]
fn drill_view_smoke_renders_first_question() {
    let harness = setup_view_harness(5, true);
    let html = harness.render();

    assert!(html.contains("Question 1 of 5"), "missing progress in {html}");
    assert!(html.contains("3 × 3"), "missing question in {html}");
    assert!(html.contains("Reporting to LMS"), "missing LMS badge in {html}");
    assert!(html.contains("width: 0%;"), "missing progress bar in {html}");
}

#[test]
fn drill_view_smoke_shows_offline_badge_without_lms() {
    let harness = setup_view_harness(5, false);
    let html = harness.render();

    assert!(
        html.contains("Offline: results are not reported"),
        "missing offline badge in {html}"
    );
    assert!(html.contains("3 × 3"), "drill must stay playable: {html}");
}

#[test]
fn drill_view_smoke_renders_feedback() {
    let harness = setup_view_harness(3, true);

    harness.drill.borrow_mut().submit("").unwrap();
    let html = harness.render();
    assert!(
        html.contains("Type your answer to continue."),
        "missing blank prompt in {html}"
    );

    harness.drill.borrow_mut().submit("8").unwrap();
    let html = harness.render();
    assert!(
        html.contains("Almost... the correct answer is 9."),
        "missing correction in {html}"
    );
    assert!(html.contains("feedback--error"), "missing tone in {html}");
}

#[test]
fn drill_view_smoke_renders_summary() {
    let harness = setup_view_harness(2, true);
    finish_round(&harness, &["9", "9"]);

    let html = harness.render();
    assert!(html.contains("Round complete"), "missing summary in {html}");
    assert!(html.contains("100%"), "missing score in {html}");
    assert!(html.contains("Try again"), "missing restart in {html}");
    assert!(html.contains("Relaunch course"), "missing relaunch in {html}");
    assert!(!html.contains("answer-form"), "exercise should be hidden: {html}");

    let api = harness.api.as_ref().unwrap();
    assert_eq!(api.value("cmi.core.score.raw").as_deref(), Some("100"));
}

#[test]
fn drill_view_smoke_disables_buttons_while_relaunching() {
    let harness = setup_view_harness(1, true);
    finish_round(&harness, &["2"]);

    assert!(harness.drill.borrow_mut().relaunch());
    let html = harness.render();
    assert!(html.contains("Relaunching..."), "missing pending label in {html}");
    assert!(html.contains("LMS session closed"), "badge should follow finish: {html}");
}
