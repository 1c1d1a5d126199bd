use chrono::{DateTime, Utc};
use drill_core::Clock;
use drill_core::model::{AnswerCheck, DrillSettings};
use scorm::ScormHandle;
use tracing::{debug, info, warn};

use crate::error::QuizError;
use crate::quiz::{QuestionGenerator, QuizSession};
use crate::tasks::{TaskKind, TaskQueue};

/// Orchestrates a drill round and its LMS reporting.
///
/// Owns the current [`QuizSession`] and the deferred-task queue; every LMS
/// call goes through the shared [`ScormHandle`], whose failures never reach
/// this type. The drill stays playable with no LMS at all.
#[derive(Debug)]
pub struct DrillWorkflow {
    settings: DrillSettings,
    clock: Clock,
    lms: ScormHandle,
    generator: QuestionGenerator,
    quiz: QuizSession,
    tasks: TaskQueue,
    feedback: Option<AnswerCheck>,
    /// Set while an LMS attempt is open; session time is measured from here.
    attempt_started_at: Option<DateTime<Utc>>,
    relaunching: bool,
}

impl DrillWorkflow {
    /// Builds the first round. The LMS is not contacted until [`boot`].
    ///
    /// [`boot`]: Self::boot
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the settings produce no questions.
    pub fn new(
        settings: DrillSettings,
        clock: Clock,
        lms: ScormHandle,
        seed: u64,
    ) -> Result<Self, QuizError> {
        let mut generator = QuestionGenerator::new(&settings, seed);
        let quiz = QuizSession::new(generator.questions(settings.total_questions()), clock.now())?;
        Ok(Self {
            settings,
            clock,
            lms,
            generator,
            quiz,
            tasks: TaskQueue::new(),
            feedback: None,
            attempt_started_at: None,
            relaunching: false,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    #[must_use]
    pub fn lms(&self) -> &ScormHandle {
        &self.lms
    }

    #[must_use]
    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    /// Feedback for the last submission, cleared when the next question shows.
    #[must_use]
    pub fn feedback(&self) -> Option<AnswerCheck> {
        self.feedback
    }

    #[must_use]
    pub fn is_relaunching(&self) -> bool {
        self.relaunching
    }

    /// True while a graded answer is on screen and input is locked.
    #[must_use]
    pub fn is_awaiting_next(&self) -> bool {
        self.tasks.is_pending(TaskKind::AdvanceQuestion)
    }

    /// When the UI should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_wake(&self) -> Option<DateTime<Utc>> {
        self.tasks.next_deadline()
    }

    /// Milliseconds until [`next_wake`](Self::next_wake) by the workflow's
    /// clock, zero when already due.
    #[must_use]
    pub fn millis_until_wake(&self) -> Option<i64> {
        self.next_wake()
            .map(|wake| (wake - self.clock.now()).num_milliseconds().max(0))
    }

    /// Fixed clocks can be moved forward to simulate elapsed time.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Page start: opens the LMS attempt and starts the first round.
    ///
    /// Returns whether the LMS session came up; the round starts either way.
    pub fn boot(&mut self) -> bool {
        let reporting = self.lms.initialize();
        self.mark_attempt(reporting);
        self.begin_round();
        info!(
            reporting,
            questions = self.quiz.total(),
            "drill started"
        );
        reporting
    }

    /// Grades the typed answer.
    ///
    /// Blank input yields `AnswerCheck::Blank` and leaves the question in
    /// place. A graded answer locks input until the advance delay passes.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AwaitingNext` while a graded answer is still on
    /// screen, `QuizError::Completed` after the last question and
    /// `QuizError::Relaunching` once a relaunch was issued.
    pub fn submit(&mut self, raw: &str) -> Result<AnswerCheck, QuizError> {
        if self.relaunching {
            return Err(QuizError::Relaunching);
        }
        if self.is_awaiting_next() {
            debug!("submission ignored while waiting for the next question");
            return Err(QuizError::AwaitingNext);
        }

        let check = self.quiz.answer(raw)?;
        self.feedback = Some(check);
        let now = self.clock.now();
        match check {
            AnswerCheck::Blank => self.tasks.schedule(TaskKind::FocusAnswer, now),
            AnswerCheck::Correct | AnswerCheck::Incorrect { .. } => {
                debug!(correct = check == AnswerCheck::Correct, "answer graded");
                self.tasks
                    .schedule(TaskKind::AdvanceQuestion, now + self.settings.advance_delay());
            }
        }
        Ok(check)
    }

    /// Runs every task due now. Returns the focus requests for the UI to
    /// apply after it re-renders.
    pub fn tick(&mut self) -> Vec<TaskKind> {
        let now = self.clock.now();
        self.tick_at(now)
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Vec<TaskKind> {
        let mut focus = Vec::new();
        for task in self.tasks.take_due(now) {
            match task.kind {
                TaskKind::AdvanceQuestion => self.advance(now),
                kind @ (TaskKind::FocusAnswer | TaskKind::FocusRestart) => focus.push(kind),
            }
        }
        focus
    }

    fn advance(&mut self, now: DateTime<Utc>) {
        match self.quiz.advance(now) {
            Ok(true) => self.complete_round(now),
            Ok(false) => {
                self.feedback = None;
                self.tasks.schedule(TaskKind::FocusAnswer, now);
            }
            Err(err) => warn!(error = %err, "advance skipped"),
        }
    }

    fn complete_round(&mut self, now: DateTime<Utc>) {
        self.feedback = None;
        let correct = self.quiz.correct_count();
        let total = self.quiz.total();
        let _ = self.lms.report_score(correct, total);
        if let Some(started_at) = self.attempt_started_at {
            let _ = self.lms.set_session_time(self.clock.millis_since(started_at));
        }
        info!(correct, total, "round complete");
        self.tasks.schedule(TaskKind::FocusRestart, now);
    }

    /// "Try again": closes the current LMS attempt, opens a new one and
    /// starts a fresh round.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Relaunching` once a relaunch was issued.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        if self.relaunching {
            return Err(QuizError::Relaunching);
        }
        self.tasks.clear();
        let reporting = self.lms.start_new_attempt();
        self.mark_attempt(reporting);
        let questions = self.generator.questions(self.settings.total_questions());
        self.quiz = QuizSession::new(questions, self.clock.now())?;
        self.begin_round();
        info!(reporting, attempt = self.lms.attempt_count(), "round restarted");
        Ok(())
    }

    /// Finishes the LMS attempt and reloads the page. While the reload is
    /// pending the workflow refuses further input.
    pub fn relaunch(&mut self) -> bool {
        if self.relaunching {
            return true;
        }
        self.relaunching = true;
        self.tasks.clear();
        self.attempt_started_at = None;
        let issued = self.lms.relaunch();
        if !issued {
            warn!("relaunch could not be issued");
            self.relaunching = false;
        }
        issued
    }

    fn mark_attempt(&mut self, reporting: bool) {
        self.attempt_started_at = reporting.then(|| self.clock.now());
    }

    // `initialize` already marked the attempt incomplete.
    fn begin_round(&mut self) {
        self.feedback = None;
        self.tasks.schedule(TaskKind::FocusAnswer, self.clock.now());
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use drill_core::time::fixed_clock;
    use scorm::LifecycleController;
    use scorm::memory::MemoryWindow;

    fn offline_workflow(total: u32) -> DrillWorkflow {
        let lms = ScormHandle::new(LifecycleController::new(MemoryWindow::detached()));
        let settings = DrillSettings::new(total, 2, 2, 800).unwrap();
        DrillWorkflow::new(settings, fixed_clock(), lms, 7).unwrap()
    }

    #[test]
    fn offline_round_is_fully_playable() {
        let mut drill = offline_workflow(2);
        assert!(!drill.boot());

        for _ in 0..2 {
            assert_eq!(drill.submit("4").unwrap(), AnswerCheck::Correct);
            drill.clock_mut().advance(Duration::milliseconds(800));
            drill.tick();
        }
        assert!(drill.quiz().is_complete());
        assert_eq!(drill.quiz().summary().unwrap().score_percent(), 100);
    }

    #[test]
    fn submissions_are_refused_until_the_delay_passes() {
        let mut drill = offline_workflow(3);
        drill.boot();
        drill.submit("5").unwrap();

        assert_eq!(drill.submit("4").unwrap_err(), QuizError::AwaitingNext);
        drill.clock_mut().advance(Duration::milliseconds(799));
        drill.tick();
        assert_eq!(drill.submit("4").unwrap_err(), QuizError::AwaitingNext);

        drill.clock_mut().advance(Duration::milliseconds(1));
        drill.tick();
        assert_eq!(drill.quiz().progress().position, 2);
        assert!(drill.feedback().is_none());
        assert_eq!(drill.submit("4").unwrap(), AnswerCheck::Correct);
    }

    #[test]
    fn blank_answer_requests_focus_and_keeps_the_question() {
        let mut drill = offline_workflow(1);
        drill.boot();
        let _ = drill.tick();

        assert_eq!(drill.submit("").unwrap(), AnswerCheck::Blank);
        assert!(!drill.is_awaiting_next());
        assert_eq!(drill.tick(), vec![TaskKind::FocusAnswer]);
        assert_eq!(drill.quiz().progress().answered, 0);
    }

    #[test]
    fn completion_requests_restart_focus() {
        let mut drill = offline_workflow(1);
        drill.boot();
        let _ = drill.tick();
        drill.submit("0").unwrap();
        drill.clock_mut().advance(Duration::seconds(1));

        assert!(drill.tick().is_empty());
        assert_eq!(drill.tick(), vec![TaskKind::FocusRestart]);
        assert_eq!(drill.next_wake(), None);
    }

    #[test]
    fn restart_starts_a_fresh_round() {
        let mut drill = offline_workflow(1);
        drill.boot();
        drill.submit("4").unwrap();
        drill.clock_mut().advance(Duration::seconds(1));
        drill.tick();

        drill.restart().unwrap();
        assert!(!drill.quiz().is_complete());
        assert_eq!(drill.quiz().correct_count(), 0);
        assert!(!drill.is_awaiting_next());
    }

    #[test]
    fn failed_relaunch_unlocks_the_page() {
        let window = MemoryWindow::detached();
        window.block_top_reload(scorm::HostError::Unavailable("top window"));
        window.block_reload(scorm::HostError::Threw("blocked".to_string()));
        let lms = ScormHandle::new(LifecycleController::new(window));
        let mut drill =
            DrillWorkflow::new(DrillSettings::default(), fixed_clock(), lms, 1).unwrap();
        drill.boot();

        assert!(!drill.relaunch());
        assert!(!drill.is_relaunching());
        assert!(drill.submit("1").is_ok());
    }
}
