//! JSON-backed task store.
//!
//! The whole task list lives in memory and is written back in full after
//! every mutation, so a completed action is always durable on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{LoadError, Result, ValidationError};
use crate::task::{now_secs, Activity, Task, TaskDocument};

/// Ordered task collection bound to one document on disk.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

/// Borrowed view of [`TaskDocument`] so saving needs no clone.
#[derive(Serialize)]
struct DocumentRef<'a> {
    tasks: &'a [Task],
}

impl TaskStore {
    /// Open the store at `path`, loading the document if it exists.
    ///
    /// A missing file yields an empty store. An unreadable or malformed
    /// file is an error; nothing is recovered or defaulted.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tasks = Self::load(&path)?;
        debug!(path = %path.display(), tasks = tasks.len(), "task store opened");
        Ok(Self { path, tasks })
    }

    fn load(path: &Path) -> Result<Vec<Task>, LoadError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LoadError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let doc: TaskDocument =
            serde_json::from_str(&content).map_err(|source| LoadError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(doc.tasks)
    }

    /// Serialize every task and overwrite the document.
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string(&DocumentRef { tasks: &self.tasks })?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), tasks = self.tasks.len(), "task store saved");
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append a task with no activities. Returns its index.
    pub fn create_task(&mut self, summary: &str) -> Result<usize> {
        self.tasks.push(Task::new(summary));
        let index = self.tasks.len() - 1;
        info!(index, summary, "task created");
        self.save()?;
        Ok(index)
    }

    /// Start a new activity on a task at the current time.
    pub fn start_activity(&mut self, task_index: usize, summary: &str) -> Result<usize> {
        self.start_activity_at(task_index, summary, now_secs())
    }

    /// Start a new activity with an explicit start timestamp. Returns the
    /// activity's index within the task.
    pub fn start_activity_at(&mut self, task_index: usize, summary: &str, at: f64) -> Result<usize> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(task_index)
            .ok_or_else(|| ValidationError::out_of_bounds("tasks", task_index, len))?;

        task.activities.push(Activity::new(summary, at));
        let activity_index = task.activities.len() - 1;
        info!(task_index, activity_index, summary, "activity started");
        self.save()?;
        Ok(activity_index)
    }

    /// Stop an activity at the current time.
    pub fn stop_activity(&mut self, task_index: usize, activity_index: usize) -> Result<()> {
        self.stop_activity_at(task_index, activity_index, now_secs())
    }

    /// Stop an activity with an explicit end timestamp.
    pub fn stop_activity_at(&mut self, task_index: usize, activity_index: usize, at: f64) -> Result<()> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(task_index)
            .ok_or_else(|| ValidationError::out_of_bounds("tasks", task_index, len))?;

        let activity_len = task.activities.len();
        let activity = task
            .activities
            .get_mut(activity_index)
            .ok_or_else(|| ValidationError::out_of_bounds("activities", activity_index, activity_len))?;

        if !activity.is_running() {
            return Err(ValidationError::AlreadyStopped {
                task: task.summary.clone(),
                activity: activity.summary.clone(),
            }
            .into());
        }

        activity.end_time = Some(at);
        info!(task_index, activity_index, "activity stopped");
        self.save()
    }
}
