//! Validated `[begin, end)` spans of civil time.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::TimefieldError;
use crate::timestamp::Timestamp;

/// An immutable span of time with `begin <= end`, both within `[MIN, MAX]`.
///
/// `end` is exclusive in spirit (a single day is `[d 00:00, d+1 00:00)`) but
/// nothing is subtracted from it when it is stored or displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    begin: Timestamp,
    end: Timestamp,
}

impl Interval {
    /// Build an interval, enforcing ordering and the sentinel bounds.
    ///
    /// # Errors
    ///
    /// Returns [`TimefieldError::InvalidInterval`] if `begin > end` or either
    /// endpoint falls outside `[Timestamp::min(), Timestamp::max()]`.
    pub fn new(begin: Timestamp, end: Timestamp) -> Result<Self, TimefieldError> {
        if begin > end {
            return Err(TimefieldError::InvalidInterval(format!(
                "begin {} is after end {}",
                begin, end
            )));
        }
        if !begin.in_range() || !end.in_range() {
            return Err(TimefieldError::InvalidInterval(format!(
                "{} - {} is outside the representable range",
                begin, end
            )));
        }
        Ok(Self { begin, end })
    }

    /// `begin` plus a whole number of days.
    pub fn days_from(begin: Timestamp, days: i64) -> Result<Self, TimefieldError> {
        let end = begin.checked_add_days(days).ok_or_else(|| {
            TimefieldError::InvalidInterval(format!("{} + {} days overflows", begin, days))
        })?;
        Self::new(begin, end)
    }

    /// The 24 hours starting at midnight on `date`.
    pub fn day(date: NaiveDate) -> Result<Self, TimefieldError> {
        Self::days_from(Timestamp::from_date(date), 1)
    }

    /// The calendar day containing `now`.
    pub fn today(now: NaiveDateTime) -> Result<Self, TimefieldError> {
        Self::day(now.date())
    }

    /// `[MIN, MAX]`, every representable instant.
    pub fn unbounded() -> Self {
        Self {
            begin: Timestamp::min(),
            end: Timestamp::max(),
        }
    }

    pub fn begin(&self) -> Timestamp {
        self.begin
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether the two spans share any instant.
    ///
    /// Spans are half-open, so `[a, b)` and `[b, c)` do not intersect. An
    /// empty span is treated as its single instant; two empty spans never
    /// intersect.
    pub fn intersects(&self, other: &Interval) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => false,
            (true, false) => other.contains(self.begin),
            (false, true) => self.contains(other.begin),
            (false, false) => self.begin < other.end && other.begin < self.end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Whether `ts` lies in `[begin, end)`.
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.begin <= ts && ts < self.end
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            begin: Timestamp,
            end: Timestamp,
        }
        let raw = Raw::deserialize(deserializer)?;
        Interval::new(raw.begin, raw.end).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
        Timestamp::from_date_time(ymd(y, m, d), NaiveTime::from_hms_opt(h, min, 0).unwrap())
    }

    #[test]
    fn test_new_accepts_ordered_endpoints() {
        let interval = Interval::new(at(2011, 12, 10, 9, 0), at(2011, 12, 10, 17, 0)).unwrap();
        assert_eq!(interval.begin(), at(2011, 12, 10, 9, 0));
        assert_eq!(interval.end(), at(2011, 12, 10, 17, 0));
    }

    #[test]
    fn test_new_accepts_empty_interval() {
        let ts = at(2011, 12, 10, 9, 0);
        assert!(Interval::new(ts, ts).is_ok());
    }

    #[test]
    fn test_new_rejects_reversed_endpoints() {
        let err = Interval::new(at(2011, 12, 11, 0, 0), at(2011, 12, 10, 0, 0)).unwrap_err();
        assert!(matches!(err, TimefieldError::InvalidInterval(_)));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let too_early = Timestamp::from_date(ymd(1399, 6, 1));
        assert!(Interval::new(too_early, Timestamp::max()).is_err());
        let too_late = Timestamp::from_date(ymd(10000, 1, 1));
        assert!(Interval::new(Timestamp::min(), too_late).is_err());
    }

    #[test]
    fn test_day_spans_midnight_to_midnight() {
        let day = Interval::day(ymd(2011, 3, 15)).unwrap();
        assert_eq!(day.begin(), Timestamp::from_date(ymd(2011, 3, 15)));
        assert_eq!(day.end(), Timestamp::from_date(ymd(2011, 3, 16)));
    }

    #[test]
    fn test_last_representable_day_is_rejected() {
        // The day after 31 Dec 9999 starts past MAX.
        assert!(Interval::day(ymd(9999, 12, 31)).is_err());
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = Interval::new(at(2011, 12, 10, 9, 0), at(2011, 12, 10, 12, 0)).unwrap();
        let b = Interval::new(at(2011, 12, 10, 11, 0), at(2011, 12, 10, 13, 0)).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_adjacent_is_false() {
        let a = Interval::day(ymd(2011, 12, 10)).unwrap();
        let b = Interval::day(ymd(2011, 12, 11)).unwrap();
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_intersects_unbounded_covers_everything() {
        let day = Interval::day(ymd(2011, 12, 10)).unwrap();
        assert!(Interval::unbounded().intersects(&day));
    }

    #[test]
    fn test_intersects_empty_interval() {
        let day = Interval::day(ymd(2011, 12, 10)).unwrap();
        let inside = Interval::new(at(2011, 12, 10, 12, 0), at(2011, 12, 10, 12, 0)).unwrap();
        let on_edge = Interval::new(at(2011, 12, 10, 0, 0), at(2011, 12, 10, 0, 0)).unwrap();
        let at_end = Interval::new(at(2011, 12, 11, 0, 0), at(2011, 12, 11, 0, 0)).unwrap();
        assert!(day.intersects(&inside));
        assert!(inside.intersects(&day));
        assert!(day.intersects(&on_edge));
        assert!(on_edge.intersects(&day));
        assert!(!day.intersects(&at_end));
        assert!(!inside.intersects(&inside));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"begin":"2011-12-11 00:00:00","end":"2011-12-10 00:00:00"}"#;
        assert!(serde_json::from_str::<Interval>(json).is_err());
        let json = r#"{"begin":"2011-12-10 00:00:00","end":"2011-12-11 00:00:00"}"#;
        let interval: Interval = serde_json::from_str(json).unwrap();
        assert_eq!(interval, Interval::day(ymd(2011, 12, 10)).unwrap());
    }
}
