//! Task and activity records.
//!
//! Timestamps are seconds since the Unix epoch with sub-second precision,
//! stored as plain JSON numbers so the document stays readable by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// A timed piece of work inside a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub summary: String,
    pub start_time: f64,
    /// Absent while the activity is in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
}

impl Activity {
    pub fn new(summary: impl Into<String>, start_time: f64) -> Self {
        Self {
            summary: summary.into(),
            start_time,
            end_time: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.end_time.is_none()
    }

    /// Elapsed seconds, or `None` while the activity is still running.
    pub fn duration(&self) -> Option<f64> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// Start time as a UTC date-time, if the stored value is representable.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_secs(self.start_time)
    }
}

/// A named unit of work made of activities in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub summary: String,
    pub activities: Vec<Activity>,
}

impl Task {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            activities: Vec::new(),
        }
    }

    /// Sum of all activity durations in seconds.
    ///
    /// Fails on the first activity without an end time.
    pub fn total_duration(&self) -> Result<f64, ValidationError> {
        self.activities.iter().try_fold(0.0, |total, activity| {
            activity
                .duration()
                .map(|d| total + d)
                .ok_or_else(|| ValidationError::ActivityInProgress {
                    task: self.summary.clone(),
                    activity: activity.summary.clone(),
                })
        })
    }
}

/// Top-level persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    /// Missing or `null` means no tasks yet.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Task>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Current wall-clock time as fractional epoch seconds.
pub fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

fn from_epoch_secs(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1_000_000_000.0).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_activity_has_no_duration() {
        let activity = Activity::new("Draft", 100.0);
        assert!(activity.is_running());
        assert_eq!(activity.duration(), None);
    }

    #[test]
    fn test_total_duration_sums_raw_seconds() {
        let mut task = Task::new("Write spec");
        task.activities.push(Activity {
            summary: "a".into(),
            start_time: 0.0,
            end_time: Some(20.0),
        });
        task.activities.push(Activity {
            summary: "b".into(),
            start_time: 100.0,
            end_time: Some(115.5),
        });
        assert_eq!(task.total_duration().unwrap(), 35.5);
    }

    #[test]
    fn test_total_duration_rejects_running_activity() {
        let mut task = Task::new("Write spec");
        task.activities.push(Activity::new("Draft", 5.0));
        let err = task.total_duration().unwrap_err();
        assert_eq!(
            err,
            ValidationError::ActivityInProgress {
                task: "Write spec".into(),
                activity: "Draft".into(),
            }
        );
    }

    #[test]
    fn test_end_time_omitted_while_running() {
        let json = serde_json::to_string(&Activity::new("Draft", 1.5)).unwrap();
        assert_eq!(json, r#"{"summary":"Draft","start_time":1.5}"#);
    }

    #[test]
    fn test_document_without_tasks_field_is_empty() {
        let doc: TaskDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.tasks.is_empty());
    }

    #[test]
    fn test_document_with_null_tasks_is_empty() {
        let doc: TaskDocument = serde_json::from_str(r#"{"tasks": null}"#).unwrap();
        assert!(doc.tasks.is_empty());
    }

    #[test]
    fn test_document_shape_mismatch_is_rejected() {
        assert!(serde_json::from_str::<TaskDocument>(r#"{"tasks": [{"summary": 3}]}"#).is_err());
        assert!(serde_json::from_str::<TaskDocument>(r#"{"tasks": [{"summary": "x"}]}"#).is_err());
    }

    #[test]
    fn test_started_at_converts_epoch_seconds() {
        let activity = Activity::new("Draft", 1_700_000_000.25);
        let at = activity.started_at().unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
        assert_eq!(at.timestamp_subsec_millis(), 250);
    }
}
