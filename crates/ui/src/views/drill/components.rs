use dioxus::prelude::*;

use crate::vm::{FeedbackVm, LmsStatus, SummaryVm};

pub(super) const ANSWER_INPUT_ID: &str = "answer";
pub(super) const RESTART_BUTTON_ID: &str = "restart";

#[component]
pub(super) fn LmsBadge(status: LmsStatus, attempt: u32) -> Element {
    rsx! {
        p { class: status.class(), id: "lms-status", role: "status",
            "{status.label()}"
            if status == LmsStatus::Reporting {
                span { class: "lms-badge__attempt", " (attempt {attempt})" }
            }
        }
    }
}

#[component]
pub(super) fn ProgressBar(label: String, style: String) -> Element {
    rsx! {
        div { class: "progress",
            p { class: "progress__text", id: "progress-text", "{label}" }
            div { class: "progress__track",
                div { class: "progress__fill", id: "progress-fill", style: "{style}" }
            }
        }
    }
}

#[component]
pub(super) fn Feedback(feedback: Option<FeedbackVm>) -> Element {
    match feedback {
        Some(feedback) => rsx! {
            p { class: feedback.class(), id: "feedback", role: "status", "{feedback.message}" }
        },
        None => rsx! {
            p { class: "feedback", id: "feedback", role: "status" }
        },
    }
}

#[component]
pub(super) fn SummaryPanel(
    summary: SummaryVm,
    relaunching: bool,
    on_restart: EventHandler<()>,
    on_relaunch: EventHandler<()>,
) -> Element {
    let verdict = if summary.passed { "Passed" } else { "Keep practicing" };
    let relaunch_label = if relaunching {
        "Relaunching..."
    } else {
        "Relaunch course"
    };

    rsx! {
        section { class: "summary", id: "summary",
            h2 { class: "summary__title", "Round complete" }
            p { class: "summary__hits",
                "Correct answers: "
                strong { id: "hits", "{summary.hits}" }
                " of "
                strong { id: "total", "{summary.total}" }
            }
            p { class: "summary__score",
                "Score: "
                strong { id: "final-score", "{summary.score_label}" }
                " ({verdict})"
            }
            p { class: "summary__time", "Time: {summary.duration_label}" }
            div { class: "summary__actions",
                button {
                    class: "btn btn-primary",
                    id: RESTART_BUTTON_ID,
                    r#type: "button",
                    disabled: relaunching,
                    onclick: move |_| on_restart.call(()),
                    "Try again"
                }
                button {
                    class: "btn btn-secondary",
                    id: "relaunch",
                    r#type: "button",
                    disabled: relaunching,
                    onclick: move |_| on_relaunch.call(()),
                    "{relaunch_label}"
                }
            }
        }
    }
}
