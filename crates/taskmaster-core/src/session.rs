//! Session state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --select/create--> TaskSelected --start--> ActivityRunning
//!  ^                          |   ^                     |
//!  +--------stop task---------+   +-------stop----------+
//! Idle --quit--> Done
//! ```
//!
//! Selecting a task whose last activity was never stopped goes straight to
//! `ActivityRunning`, so at most one activity per task is ever in progress.
//!
//! The session owns the [`TaskStore`]; every transition that mutates tasks
//! goes through the store and is saved before it returns. The cursor itself
//! is never persisted, so a new session always starts in `Idle`.

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::report::export_report;
use crate::storage::TaskStore;
use crate::task::{Activity, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No current task.
    Idle,
    /// A task is current, no activity is running.
    TaskSelected { task: usize },
    /// A task is current and one of its activities is running.
    ActivityRunning { task: usize, activity: usize },
    /// Terminal.
    Done,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::TaskSelected { task } => write!(f, "task {task} is selected"),
            SessionState::ActivityRunning { task, activity } => {
                write!(f, "activity {activity} of task {task} is running")
            }
            SessionState::Done => write!(f, "done"),
        }
    }
}

/// Input accepted at the main (idle) prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Create,
    Export,
    Quit,
    Select(usize),
    NotAnOption,
}

impl MainChoice {
    /// Parse one line of input.
    ///
    /// `+` creates, `=` exports, `x`/`X` and the exact word `exit` quit, and
    /// a string of ASCII digits selects a task by index. Nothing is trimmed.
    pub fn parse(input: &str) -> Self {
        match input {
            "exit" => return MainChoice::Quit,
            "+" => return MainChoice::Create,
            "=" => return MainChoice::Export,
            _ => {}
        }
        if input.eq_ignore_ascii_case("x") {
            return MainChoice::Quit;
        }
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return MainChoice::NotAnOption;
        }
        // Digits that overflow are past the end of any task list.
        MainChoice::Select(input.parse().unwrap_or(usize::MAX))
    }
}

/// Input accepted at the task prompt while no activity runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskChoice {
    StartActivity,
    StopTask,
    /// Anything else; the prompt is simply shown again.
    Ignored,
}

impl TaskChoice {
    pub fn parse(input: &str) -> Self {
        if input == "+" {
            TaskChoice::StartActivity
        } else if input.eq_ignore_ascii_case("x") {
            TaskChoice::StopTask
        } else {
            TaskChoice::Ignored
        }
    }
}

/// Rejected task selection. The session state is left unchanged.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    #[error("Not a task")]
    NotATask { index: usize, len: usize },

    #[error("Cannot select a task while {0}")]
    Busy(SessionState),
}

/// Interactive session: the task store plus the current-task cursor.
#[derive(Debug)]
pub struct Session {
    store: TaskStore,
    state: SessionState,
}

impl Session {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            state: SessionState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn current_task(&self) -> Option<&Task> {
        match self.state {
            SessionState::TaskSelected { task } | SessionState::ActivityRunning { task, .. } => {
                self.store.task(task)
            }
            SessionState::Idle | SessionState::Done => None,
        }
    }

    pub fn current_activity(&self) -> Option<&Activity> {
        match self.state {
            SessionState::ActivityRunning { task, activity } => {
                self.store.task(task)?.activities.get(activity)
            }
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> ValidationError {
        ValidationError::InvalidTransition {
            action,
            state: self.state.to_string(),
        }
    }

    // ── Idle transitions ─────────────────────────────────────────────

    /// Make the task at `index` current.
    ///
    /// If the task's last activity was left running by an earlier session,
    /// it becomes the current activity so it can be stopped.
    pub fn select(&mut self, index: usize) -> Result<(), SelectError> {
        if self.state != SessionState::Idle {
            return Err(SelectError::Busy(self.state));
        }
        let len = self.store.len();
        if index >= len {
            return Err(SelectError::NotATask { index, len });
        }
        let running = self
            .store
            .task(index)
            .and_then(|task| task.activities.iter().rposition(Activity::is_running));
        self.state = match running {
            Some(activity) => {
                debug!(task = index, activity, "task selected, resuming running activity");
                SessionState::ActivityRunning { task: index, activity }
            }
            None => {
                debug!(task = index, "task selected");
                SessionState::TaskSelected { task: index }
            }
        };
        Ok(())
    }

    /// Create a task and make it current.
    pub fn create_task(&mut self, summary: &str) -> Result<usize> {
        if self.state != SessionState::Idle {
            return Err(self.invalid("create a task").into());
        }
        let index = self.store.create_task(summary)?;
        self.state = SessionState::TaskSelected { task: index };
        Ok(index)
    }

    /// Write the duration report for every task to `path`.
    pub fn export(&self, path: &Path) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(self.invalid("export").into());
        }
        export_report(self.store.tasks(), path)
    }

    pub fn quit(&mut self) {
        debug!(from = %self.state, "session done");
        self.state = SessionState::Done;
    }

    // ── Task transitions ─────────────────────────────────────────────

    /// Start an activity on the current task.
    pub fn start_activity(&mut self, summary: &str) -> Result<usize> {
        let SessionState::TaskSelected { task } = self.state else {
            return Err(self.invalid("start an activity").into());
        };
        let activity = self.store.start_activity(task, summary)?;
        self.state = SessionState::ActivityRunning { task, activity };
        Ok(activity)
    }

    /// Stop the running activity, keeping its task current.
    pub fn stop_activity(&mut self) -> Result<()> {
        let SessionState::ActivityRunning { task, activity } = self.state else {
            return Err(self.invalid("stop an activity").into());
        };
        self.store.stop_activity(task, activity)?;
        self.state = SessionState::TaskSelected { task };
        Ok(())
    }

    /// Return to `Idle`.
    pub fn stop_task(&mut self) -> Result<()> {
        let SessionState::TaskSelected { task } = self.state else {
            return Err(self.invalid("stop the task").into());
        };
        debug!(task, "task stopped");
        self.state = SessionState::Idle;
        Ok(())
    }
}
