//! One-shot deferred work for the drill page.
//!
//! Replaces ad-hoc timers: the UI asks for the next deadline, sleeps until
//! then, and drains whatever is due. At most one task per kind is pending.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Move past a graded question. While pending, submissions are refused.
    AdvanceQuestion,
    /// Focus the answer field once the page has rendered.
    FocusAnswer,
    /// Focus the try-again button on the summary screen.
    FocusRestart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub kind: TaskKind,
    pub due_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    pending: Vec<ScheduledTask>,
}

impl TaskQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind`, replacing a pending task of the same kind.
    pub fn schedule(&mut self, kind: TaskKind, due_at: DateTime<Utc>) {
        self.cancel(kind);
        self.pending.push(ScheduledTask { kind, due_at });
    }

    /// Returns true if a task was removed.
    pub fn cancel(&mut self, kind: TaskKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.kind != kind);
        self.pending.len() != before
    }

    #[must_use]
    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.pending.iter().any(|task| task.kind == kind)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.iter().map(|task| task.due_at).min()
    }

    /// Removes and returns every task due at `now`, earliest first. Ties keep
    /// scheduling order.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<ScheduledTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|task| task.due_at <= now);
        self.pending = pending;
        due.sort_by_key(|task| task.due_at);
        due
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
