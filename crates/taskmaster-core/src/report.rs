//! Duration report export.
//!
//! Every task becomes a block of lines:
//!
//! ```text
//! # <task summary>
//! Total duration: <formatted total>
//! - <activity summary> (<formatted duration>)
//! ```
//!
//! Blocks are concatenated and the lines joined with `\n`, without a
//! trailing newline. Totals are summed from raw seconds and formatted once.

use std::path::Path;

use tracing::info;

use crate::duration::format_duration;
use crate::error::{Result, ValidationError};
use crate::task::Task;

/// Render the report text for `tasks`.
///
/// Fails if any activity is still in progress, since it has no duration.
pub fn render_report(tasks: &[Task]) -> Result<String, ValidationError> {
    let mut lines: Vec<String> = Vec::new();
    for task in tasks {
        render_task(task, &mut lines)?;
    }
    Ok(lines.join("\n"))
}

fn render_task(task: &Task, lines: &mut Vec<String>) -> Result<(), ValidationError> {
    let total = task.total_duration()?;

    lines.push(format!("# {}", task.summary));
    lines.push(format!("Total duration: {}", format_duration(total)));

    for activity in &task.activities {
        // total_duration already rejected running activities
        let duration = activity.duration().unwrap_or_default();
        lines.push(format!("- {} ({})", activity.summary, format_duration(duration)));
    }
    Ok(())
}

/// Render the report and overwrite `path` with it.
///
/// Nothing is written if rendering fails.
pub fn export_report(tasks: &[Task], path: &Path) -> Result<()> {
    let report = render_report(tasks)?;
    std::fs::write(path, report)?;
    info!(path = %path.display(), tasks = tasks.len(), "report exported");
    Ok(())
}
