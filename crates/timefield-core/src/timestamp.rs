//! Minute-resolution civil timestamps with open-ended sentinels.
//!
//! A [`Timestamp`] is a local date and time-of-day with seconds always zero.
//! Two sentinels mark unbounded intervals: [`Timestamp::min`] ("<", the
//! earliest representable instant) and [`Timestamp::max`] (">", the latest).
//! They are ordinary values at the edges of the calendar range, so they order
//! and compare like any other timestamp.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimefieldError;

/// Earliest calendar year a timestamp may carry.
pub const MIN_YEAR: i32 = 1400;

/// Latest calendar year a timestamp may carry.
pub const MAX_YEAR: i32 = 9999;

/// Encoding used when timestamps are written to the task file.
const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point in local civil time at minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The "negative infinity" sentinel: 1 January 1400, 00:00.
    pub fn min() -> Self {
        let date = NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN);
        Self(date.and_time(NaiveTime::default()))
    }

    /// The "positive infinity" sentinel: 31 December 9999, 23:59.
    ///
    /// Note the time-of-day is 23:59, not 00:00. The formatter treats an
    /// interval ending here as full-day regardless.
    pub fn max() -> Self {
        let date = NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX);
        let time = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default();
        Self(date.and_time(time))
    }

    /// Midnight at the start of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::default()))
    }

    /// Combine a date with a time-of-day, dropping seconds.
    pub fn from_date_time(date: NaiveDate, time: NaiveTime) -> Self {
        Self::from_naive(date.and_time(time))
    }

    /// Wrap a naive datetime, truncating it to the minute.
    pub fn from_naive(naive: NaiveDateTime) -> Self {
        let time = naive.time();
        let truncated = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Self(naive.date().and_time(truncated))
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn is_min(&self) -> bool {
        *self == Self::min()
    }

    pub fn is_max(&self) -> bool {
        *self == Self::max()
    }

    /// Whether the timestamp lies in `[MIN, MAX]`.
    pub fn in_range(&self) -> bool {
        *self >= Self::min() && *self <= Self::max()
    }

    /// Shift by whole days. Returns `None` if chrono's own range is exceeded.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        self.0
            .checked_add_signed(chrono::Duration::days(days))
            .map(Self)
    }

    /// `YYYY-MM-DD HH:MM:SS`, the form written to the task file.
    pub fn to_storage_string(&self) -> String {
        self.0.format(STORAGE_FORMAT).to_string()
    }

    /// Inverse of [`Timestamp::to_storage_string`].
    pub fn parse_storage_string(s: &str) -> Result<Self, TimefieldError> {
        NaiveDateTime::parse_from_str(s.trim(), STORAGE_FORMAT)
            .map(Self::from_naive)
            .map_err(|e| TimefieldError::InvalidDateTimeFormat(format!("'{}': {}", s, e)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_storage_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_storage_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_storage_string(&s).map_err(serde::de::Error::custom)
    }
}
