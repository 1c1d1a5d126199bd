use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dioxus::document::eval;
use dioxus::prelude::*;
use services::{DrillWorkflow, TaskKind};
use tracing::debug;

use super::components::{
    ANSWER_INPUT_ID, Feedback, LmsBadge, ProgressBar, RESTART_BUTTON_ID, SummaryPanel,
};
use super::scripts::{focus_script, sleep_script};
use crate::context::AppContext;
use crate::vm::DrillVm;

async fn sleep_ms(ms: i64) -> bool {
    eval(&sleep_script(ms)).await.is_ok()
}

fn focus_target(kind: TaskKind) -> Option<&'static str> {
    match kind {
        TaskKind::FocusAnswer => Some(ANSWER_INPUT_ID),
        TaskKind::FocusRestart => Some(RESTART_BUTTON_ID),
        TaskKind::AdvanceQuestion => None,
    }
}

/// Drains the workflow's task queue, sleeping until each deadline.
///
/// One pump runs at a time; it stops when the queue is empty and is
/// restarted by the next user action. Without a browser document the sleep
/// fails and the pump stops.
#[derive(Clone)]
struct TaskPump {
    drill: Rc<RefCell<DrillWorkflow>>,
    running: Rc<Cell<bool>>,
    revision: Signal<u64>,
    answer: Signal<String>,
}

impl TaskPump {
    fn kick(&self) {
        if self.running.replace(true) {
            return;
        }
        let pump = self.clone();
        spawn(async move {
            pump.run().await;
            pump.running.set(false);
        });
    }

    async fn run(&self) {
        let mut revision = self.revision;
        let mut answer = self.answer;
        loop {
            let Some(wait_ms) = self.drill.borrow().millis_until_wake() else {
                break;
            };
            if !sleep_ms(wait_ms).await {
                debug!("no document to schedule on; task pump stopped");
                break;
            }

            let (focus, moved_on) = {
                let mut drill = self.drill.borrow_mut();
                let before = drill.quiz().progress();
                let focus = drill.tick();
                (focus, drill.quiz().progress() != before)
            };
            if moved_on {
                answer.set(String::new());
            }
            *revision.write() += 1;

            for target in focus.into_iter().filter_map(focus_target) {
                let _ = eval(&focus_script(target));
            }
        }
    }
}

#[component]
pub fn DrillView() -> Element {
    let ctx = use_context::<AppContext>();
    let drill = ctx.drill();

    let revision = use_signal(|| 0_u64);
    let mut answer = use_signal(String::new);
    let mut relaunch_pending = use_signal(|| false);
    let pump = use_hook({
        let drill = Rc::clone(&drill);
        move || TaskPump {
            drill,
            running: Rc::new(Cell::new(false)),
            revision,
            answer,
        }
    });
    use_hook({
        let pump = pump.clone();
        move || pump.kick()
    });

    let on_submit = {
        let drill = Rc::clone(&drill);
        let pump = pump.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let raw = answer.read().clone();
            if let Err(err) = drill.borrow_mut().submit(&raw) {
                debug!(error = %err, "submission ignored");
            }
            let mut revision = pump.revision;
            *revision.write() += 1;
            pump.kick();
        }
    };

    let on_restart = {
        let drill = Rc::clone(&drill);
        let pump = pump.clone();
        move |()| {
            if let Err(err) = drill.borrow_mut().restart() {
                debug!(error = %err, "restart ignored");
                return;
            }
            answer.set(String::new());
            let mut revision = pump.revision;
            *revision.write() += 1;
            pump.kick();
        }
    };

    let on_relaunch = {
        let drill = Rc::clone(&drill);
        let revision = pump.revision;
        move |()| {
            if relaunch_pending() {
                return;
            }
            relaunch_pending.set(true);
            let drill = Rc::clone(&drill);
            let mut revision = revision;
            let mut pending = relaunch_pending;
            spawn(async move {
                // Let the disabled button paint before the page goes away.
                let _ = sleep_ms(0).await;
                let issued = drill.borrow_mut().relaunch();
                if !issued {
                    pending.set(false);
                }
                *revision.write() += 1;
            });
        }
    };

    let _revision = revision();
    let vm = DrillVm::from_workflow(&drill.borrow());
    let relaunching = vm.relaunching || relaunch_pending();
    let question = vm.question.clone().unwrap_or_default();

    rsx! {
        main { class: "drill", id: "drill-root",
            header { class: "drill__header",
                h1 { class: "drill__title", "Multiplication drill" }
                LmsBadge { status: vm.lms_status, attempt: vm.attempt }
            }
            ProgressBar { label: vm.progress_label.clone(), style: vm.progress_style() }
            if let Some(summary) = vm.summary.clone() {
                SummaryPanel {
                    summary,
                    relaunching,
                    on_restart,
                    on_relaunch,
                }
            } else {
                section { class: "exercise", id: "exercise",
                    p { class: "exercise__question", id: "question", "{question}" }
                    form { class: "exercise__form", id: "answer-form", onsubmit: on_submit,
                        label { class: "visually-hidden", r#for: ANSWER_INPUT_ID, "Your answer" }
                        input {
                            id: ANSWER_INPUT_ID,
                            class: "exercise__input",
                            r#type: "text",
                            autocomplete: "off",
                            value: "{answer}",
                            disabled: relaunching,
                            oninput: move |evt: FormEvent| answer.set(evt.value()),
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: vm.awaiting_next || relaunching,
                            "Check"
                        }
                    }
                    Feedback { feedback: vm.feedback.clone() }
                }
            }
        }
    }
}
