//! Tasks and their estimated durations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimefieldError;
use crate::format::{format_interval_with_options, FormatOptions};
use crate::interval::Interval;

// ── TaskDuration ────────────────────────────────────────────────────────────

/// Estimated effort for a task, non-negative, with second resolution.
///
/// Users type `H:M`; the stored and displayed form is `HH:MM:SS`. Hours are
/// not capped at 24, so `36:00:00` is a valid estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TaskDuration {
    seconds: u64,
}

impl TaskDuration {
    /// `None` if the total number of seconds does not fit in a `u64`.
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Option<Self> {
        let seconds = hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(seconds)?;
        Some(Self { seconds })
    }

    pub fn as_seconds(&self) -> u64 {
        self.seconds
    }

    /// Parse `H:M` or `H:M:S`.
    ///
    /// # Errors
    ///
    /// Returns [`TimefieldError::InvalidDuration`] if a component is missing
    /// or not a non-negative integer, if minutes or seconds exceed 59, or if
    /// the total is too large to represent.
    pub fn parse(s: &str) -> Result<Self, TimefieldError> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(TimefieldError::InvalidDuration(format!(
                "expected H:M or H:M:S, got '{s}'"
            )));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                TimefieldError::InvalidDuration(format!("invalid number '{part}' in '{s}'"))
            })?;
        }

        let [hours, minutes, seconds] = numbers;
        if minutes > 59 || seconds > 59 {
            return Err(TimefieldError::InvalidDuration(format!(
                "minutes and seconds must be below 60 in '{s}'"
            )));
        }

        Self::from_hms(hours, minutes, seconds)
            .ok_or_else(|| TimefieldError::InvalidDuration(format!("'{s}' is too long")))
    }
}

impl FromStr for TaskDuration {
    type Err = TimefieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl Serialize for TaskDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ── Task ────────────────────────────────────────────────────────────────────

/// A unit of work with a release/due interval and an effort estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub notes: String,
    /// `begin` is the release date, `end` the due date.
    pub interval: Interval,
    pub duration: TaskDuration,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        notes: impl Into<String>,
        interval: Interval,
        duration: TaskDuration,
    ) -> Self {
        Self {
            title: title.into(),
            notes: notes.into(),
            interval,
            duration,
        }
    }

    /// Title, notes, interval and duration, one per line.
    pub fn detail_lines(&self, options: &FormatOptions) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.title,
            self.notes,
            format_interval_with_options(&self.interval, options),
            self.duration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_duration_parse_hours_minutes() {
        let d = TaskDuration::parse("2:30").unwrap();
        assert_eq!(d.as_seconds(), 9000);
        assert_eq!(d.to_string(), "02:30:00");
    }

    #[test]
    fn test_duration_parse_with_seconds() {
        let d: TaskDuration = "01:00:15".parse().unwrap();
        assert_eq!(d, TaskDuration::from_hms(1, 0, 15).unwrap());
    }

    #[test]
    fn test_duration_hours_past_a_day() {
        let d = TaskDuration::parse("36:00").unwrap();
        assert_eq!(d.to_string(), "36:00:00");
    }

    #[test]
    fn test_duration_rejects_bad_input() {
        for input in ["", "2", "2h", "a:30", "1:60", "1:00:60", "-1:00", "1:2:3:4", "1:"] {
            let err = TaskDuration::parse(input).unwrap_err();
            assert!(
                matches!(err, TimefieldError::InvalidDuration(_)),
                "input {input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_duration_rejects_overflow() {
        for input in [
            "5124095576030432:00",
            "18446744073709551615:00",
            "18446744073709551615:0:1",
        ] {
            let err = TaskDuration::parse(input).unwrap_err();
            assert!(
                matches!(err, TimefieldError::InvalidDuration(_)),
                "input {input:?} gave {err:?}"
            );
        }
        assert!(TaskDuration::from_hms(u64::MAX / 3600, 59, 59).is_none());
    }

    #[test]
    fn test_duration_largest_hour_count() {
        let hours = u64::MAX / 3600;
        let d = TaskDuration::parse(&format!("{hours}:00")).unwrap();
        assert_eq!(d.as_seconds(), hours * 3600);
    }

    #[test]
    fn test_duration_serde_string() {
        let d = TaskDuration::from_hms(0, 45, 0).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"00:45:00\"");
        assert_eq!(serde_json::from_str::<TaskDuration>(&json).unwrap(), d);
    }

    #[test]
    fn test_detail_lines() {
        let interval = Interval::day(NaiveDate::from_ymd_opt(2011, 12, 12).unwrap()).unwrap();
        let task = Task::new(
            "Write report",
            "Quarterly numbers",
            interval,
            TaskDuration::from_hms(3, 0, 0).unwrap(),
        );
        assert_eq!(
            task.detail_lines(&FormatOptions::default()),
            "Write report\nQuarterly numbers\n[12 12 2011]\n03:00:00"
        );
    }
}
