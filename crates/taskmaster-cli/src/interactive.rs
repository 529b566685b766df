//! Interactive loop driving a [`Session`] through a [`Console`].
//!
//! Each iteration prints the banner and shows either the main prompt (no
//! current task) or the task prompt, reading exactly one line per prompt.
//! End of input quits; a running activity is left as persisted.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::Local;
use taskmaster_core::error::Result;
use taskmaster_core::{Activity, CoreError, MainChoice, Session, SessionState, TaskChoice};
use tracing::{debug, warn};

use crate::console::Console;

const BANNER: &str = "=========================";
const MAIN_MENU: &str = "[+] Create New Task / [=] Export / [x] Exit";
const TASK_MENU: &str = "[+] Start Activity / [x] Stop Task";
const SELECT_PROMPT: &str = "Select Option: ";
const FALLBACK_TIME_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// Owns the session for the lifetime of the program.
pub struct Interactive<C> {
    session: Session,
    console: C,
    report_path: PathBuf,
    time_format: String,
}

impl<C: Console> Interactive<C> {
    pub fn new(session: Session, console: C, report_path: PathBuf, time_format: String) -> Self {
        Self {
            session,
            console,
            report_path,
            time_format,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn into_console(self) -> C {
        self.console
    }

    /// Run until the session is done.
    pub fn run(&mut self) -> Result<()> {
        while !self.session.is_done() {
            self.step()?;
        }
        Ok(())
    }

    /// One banner plus one prompt.
    pub fn step(&mut self) -> Result<()> {
        self.console.print_line(BANNER)?;
        match self.session.state() {
            SessionState::Idle => self.main_prompt(),
            SessionState::TaskSelected { .. } => self.task_prompt(),
            SessionState::ActivityRunning { .. } => self.activity_prompt(),
            SessionState::Done => Ok(()),
        }
    }

    /// Read a line, ending the session on end of input.
    fn read(&mut self, prompt: &str) -> Result<Option<String>> {
        let line = self.console.read_line(prompt)?;
        if line.is_none() {
            debug!("end of input");
            self.session.quit();
        }
        Ok(line)
    }

    fn main_prompt(&mut self) -> Result<()> {
        for (i, task) in self.session.store().tasks().iter().enumerate() {
            self.console.print_line(&format!("[{i}] {}", task.summary))?;
        }
        self.console.print_line(MAIN_MENU)?;

        let Some(input) = self.read(SELECT_PROMPT)? else {
            return Ok(());
        };

        match MainChoice::parse(&input) {
            MainChoice::Quit => self.session.quit(),
            MainChoice::Create => {
                if let Some(summary) = self.read("Task summary: ")? {
                    self.session.create_task(&summary)?;
                }
            }
            MainChoice::Export => match self.session.export(&self.report_path) {
                Ok(()) => self.console.print_line("Export Complete!")?,
                Err(CoreError::Validation(e)) => {
                    warn!(error = %e, "export refused");
                    self.console.print_line(&e.to_string())?;
                }
                Err(e) => return Err(e),
            },
            MainChoice::Select(index) => {
                if let Err(e) = self.session.select(index) {
                    self.console.print_line(&e.to_string())?;
                }
            }
            MainChoice::NotAnOption => self.console.print_line("Not an option")?,
        }
        Ok(())
    }

    fn print_current_task(&mut self) -> Result<()> {
        let summary = self
            .session
            .current_task()
            .map(|task| task.summary.clone())
            .unwrap_or_default();
        self.console.print_line(&format!("Current Task: {summary}"))?;
        Ok(())
    }

    fn task_prompt(&mut self) -> Result<()> {
        self.print_current_task()?;
        self.console.print_line(TASK_MENU)?;

        let Some(input) = self.read(SELECT_PROMPT)? else {
            return Ok(());
        };

        match TaskChoice::parse(&input) {
            TaskChoice::StartActivity => {
                if let Some(summary) = self.read("Activity summary: ")? {
                    self.session.start_activity(&summary)?;
                }
            }
            TaskChoice::StopTask => self.session.stop_task()?,
            TaskChoice::Ignored => {}
        }
        Ok(())
    }

    fn activity_prompt(&mut self) -> Result<()> {
        self.print_current_task()?;
        if let Some(activity) = self.session.current_activity() {
            let summary = format!("Current Activity: {}", activity.summary);
            let started = format!("Started at {}", format_start(activity, &self.time_format));
            self.console.print_line(&summary)?;
            self.console.print_line(&started)?;
        }

        if self.read("Enter anything to stop activity: ")?.is_some() {
            self.session.stop_activity()?;
        }
        Ok(())
    }
}

/// Local start time of `activity` rendered with `time_format`.
fn format_start(activity: &Activity, time_format: &str) -> String {
    let Some(at) = activity.started_at() else {
        return activity.start_time.to_string();
    };
    let local = at.with_timezone(&Local);

    let mut out = String::new();
    if write!(out, "{}", local.format(time_format)).is_err() {
        warn!(time_format, "invalid display.time_format, using default");
        out.clear();
        let _ = write!(out, "{}", local.format(FALLBACK_TIME_FORMAT));
    }
    out
}
