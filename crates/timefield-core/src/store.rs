//! JSON persistence for the task list.
//!
//! The file holds one object with a `tasks` array. Each entry keeps the
//! interval as two `YYYY-MM-DD HH:MM:SS` strings and the duration as
//! `HH:MM:SS`:
//!
//! ```json
//! {
//!   "tasks": [
//!     {
//!       "title": "Write report",
//!       "notes": "",
//!       "release_date": "2011-12-12 00:00:00",
//!       "due_date": "2011-12-13 00:00:00",
//!       "duration": "03:00:00"
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TimefieldError;
use crate::interval::Interval;
use crate::task::{Task, TaskDuration};
use crate::task_list::TaskList;
use crate::timestamp::Timestamp;

#[derive(Debug, Serialize, Deserialize)]
struct TaskFile {
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskRecord {
    title: String,
    #[serde(default)]
    notes: String,
    release_date: Timestamp,
    due_date: Timestamp,
    duration: TaskDuration,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            notes: task.notes.clone(),
            release_date: task.interval.begin(),
            due_date: task.interval.end(),
            duration: task.duration,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = TimefieldError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let interval = Interval::new(record.release_date, record.due_date)?;
        Ok(Task::new(record.title, record.notes, interval, record.duration))
    }
}

/// Loads and saves a [`TaskList`] at a fixed path.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the task list. A missing file is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TimefieldError::Storage`] if the file cannot be read, is not
    /// valid JSON of the expected shape, or holds an invalid interval.
    pub fn load(&self) -> Result<TaskList, TimefieldError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet");
                return Ok(TaskList::new());
            }
            Err(e) => return Err(self.storage_error("read", e)),
        };

        let file: TaskFile =
            serde_json::from_str(&text).map_err(|e| self.storage_error("parse", e))?;
        let tasks = file
            .tasks
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<TaskList, _>>()
            .map_err(|e| self.storage_error("parse", e))?;

        info!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Write the task list, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`TimefieldError::Storage`] if the file cannot be written.
    pub fn save(&self, tasks: &TaskList) -> Result<(), TimefieldError> {
        let file = TaskFile {
            tasks: tasks.iter().map(|(_, task)| TaskRecord::from(task)).collect(),
        };
        let json =
            serde_json::to_string_pretty(&file).map_err(|e| self.storage_error("encode", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| self.storage_error("create directory for", e))?;
        }
        fs::write(&self.path, json + "\n").map_err(|e| self.storage_error("write", e))?;

        info!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> TimefieldError {
        TimefieldError::Storage(format!("{} '{}': {}", action, self.path.display(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample() -> TaskList {
        let date = NaiveDate::from_ymd_opt(2011, 12, 12).unwrap();
        let timed = Interval::new(
            Timestamp::from_date_time(date, NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
            Timestamp::max(),
        )
        .unwrap();
        [
            Task::new(
                "Write report",
                "Quarterly",
                Interval::day(date).unwrap(),
                TaskDuration::from_hms(3, 0, 0).unwrap(),
            ),
            Task::new("Someday", "", timed, TaskDuration::from_hms(0, 45, 0).unwrap()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("nested").join("tasks.json"));
        let tasks = sample();
        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn test_saved_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        store.save(&sample()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let first = &value["tasks"][0];
        assert_eq!(first["title"], "Write report");
        assert_eq!(first["release_date"], "2011-12-12 00:00:00");
        assert_eq!(first["due_date"], "2011-12-13 00:00:00");
        assert_eq!(first["duration"], "03:00:00");
        assert_eq!(value["tasks"][1]["due_date"], "9999-12-31 23:59:00");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();
        let err = TaskStore::new(&path).load().unwrap_err();
        assert!(matches!(err, TimefieldError::Storage(_)));
    }

    #[test]
    fn test_load_rejects_reversed_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"{"tasks":[{"title":"x","notes":"","release_date":"2011-12-13 00:00:00",
                "due_date":"2011-12-12 00:00:00","duration":"01:00:00"}]}"#,
        )
        .unwrap();
        let err = TaskStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Invalid interval"), "got: {err}");
    }

    #[test]
    fn test_load_defaults_missing_notes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"{"tasks":[{"title":"x","release_date":"2011-12-12 00:00:00",
                "due_date":"2011-12-13 00:00:00","duration":"01:00:00"}]}"#,
        )
        .unwrap();
        let tasks = TaskStore::new(&path).load().unwrap();
        assert_eq!(tasks.get(1).unwrap().notes, "");
    }
}
