//! User-facing strings, kept out of the code so they can be localized.
//!
//! A [`StringTable`] starts from built-in English text. A JSON file with an
//! object of `"identifier": "text"` pairs can override any subset of them,
//! including the six shortcut words used by the interval parser.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::TimefieldError;
use crate::parse::Keywords;

const DEFAULT_HELP: &str = "\
Commands:
  l                 list tasks in the working interval
  c <interval>      change the working interval
  n                 create a new task
  p <n>             print task n
  d <n>             delete task n
  h                 show this help
  q                 save and quit

Intervals:
  today | prev day | this day | next day | prev week | this week | next week
  M/D[/Y]                       a single day
  <from> - <to>                 each side is M/D[/Y], H:M, M/D[/Y] H:M, now, < or >";

const DEFAULTS: &[(&str, &str)] = &[
    ("application-title", "TimeField"),
    ("application-version", env!("CARGO_PKG_VERSION")),
    ("command-prompt", "Enter a command (h for help)."),
    ("invalid-command-error", "Invalid command."),
    ("invalid-interval-error", "Invalid interval."),
    ("invalid-input-error", "Invalid input."),
    ("invalid-task-error", "Invalid task."),
    ("new-task-prompt", "New task"),
    ("title-prompt", "Title"),
    ("notes-prompt", "Notes"),
    ("interval-prompt", "Interval"),
    ("duration-prompt", "Duration (H:M)"),
    ("help", DEFAULT_HELP),
    ("today", "today"),
    ("prev", "prev"),
    ("this", "this"),
    ("next", "next"),
    ("day", "day"),
    ("week", "week"),
];

/// Identifier → text lookup with English defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    entries: BTreeMap<String, String>,
}

impl Default for StringTable {
    fn default() -> Self {
        Self {
            entries: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl StringTable {
    /// Defaults overlaid with the entries of a JSON object file.
    ///
    /// # Errors
    ///
    /// Returns [`TimefieldError::Storage`] if the file cannot be read or is
    /// not a JSON object of strings.
    pub fn load(path: &Path) -> Result<Self, TimefieldError> {
        let text = fs::read_to_string(path).map_err(|e| {
            TimefieldError::Storage(format!("read '{}': {}", path.display(), e))
        })?;
        let overrides: BTreeMap<String, String> = serde_json::from_str(&text).map_err(|e| {
            TimefieldError::Storage(format!("parse '{}': {}", path.display(), e))
        })?;

        let mut table = Self::default();
        for key in overrides.keys() {
            if !table.entries.contains_key(key) {
                warn!(key = %key, path = %path.display(), "unknown string identifier");
            }
        }
        debug!(count = overrides.len(), path = %path.display(), "loaded string overrides");
        table.entries.extend(overrides);
        Ok(table)
    }

    /// The text for `key`, or `key` itself if there is none.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// The shortcut words for [`crate::parse::ParseOptions`].
    pub fn keywords(&self) -> Keywords {
        Keywords {
            today: self.get("today").to_string(),
            prev: self.get("prev").to_string(),
            this: self.get("this").to_string(),
            next: self.get("next").to_string(),
            day: self.get("day").to_string(),
            week: self.get("week").to_string(),
        }
    }
}
