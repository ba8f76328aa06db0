//! Canonical bracketed rendering of intervals.
//!
//! This is the text shown in front of every command prompt and in the task
//! detail view:
//!
//! - `[15 3 2011]`: exactly one full day
//! - `[4 12 2011 - 11 12 2011]`: whole days
//! - `[15 3 2011 09:00 - 15 3 2011 17:30]`: anything with a time component
//! - `[< - 1 3 2012]`: open-ended, using the sentinels

use chrono::{Datelike, NaiveDate, Timelike};

use crate::interval::Interval;
use crate::timestamp::Timestamp;

/// How the month of a date is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthStyle {
    /// `15 3 2011`
    #[default]
    Numeric,
    /// `15 Mar 2011`
    Short,
    /// `15 March 2011`
    Long,
}

/// Options for [`format_interval_with_options`].
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub month_style: MonthStyle,
}

/// Render an interval with numeric months.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timefield_core::{format_interval, Interval};
///
/// let day = Interval::day(NaiveDate::from_ymd_opt(2011, 3, 15).unwrap()).unwrap();
/// assert_eq!(format_interval(&day), "[15 3 2011]");
/// ```
pub fn format_interval(interval: &Interval) -> String {
    format_interval_with_options(interval, &FormatOptions::default())
}

/// Render an interval in the bracketed display form.
///
/// Times are omitted when both endpoints sit on midnight, or when the begin
/// does and the end is [`Timestamp::max`] (whose stored time is 23:59). A span
/// of exactly one such day is shown as its begin date alone.
pub fn format_interval_with_options(interval: &Interval, options: &FormatOptions) -> String {
    let begin = interval.begin();
    let end = interval.end();

    let mut begin_time = format_time(&begin);
    let mut end_time = format_time(&end);

    let full_day = begin_time == MIDNIGHT && (end_time == MIDNIGHT || end.is_max());
    if full_day {
        begin_time.clear();
        end_time.clear();
    }

    let begin_text = format_endpoint(&begin, &begin_time, options.month_style);
    let single_day = full_day && begin.date().succ_opt() == Some(end.date());
    if single_day {
        return format!("[{begin_text}]");
    }

    let end_text = format_endpoint(&end, &end_time, options.month_style);
    format!("[{begin_text} - {end_text}]")
}

const MIDNIGHT: &str = " 00:00";

/// ` HH:MM`, zero-padded, with the leading space.
fn format_time(ts: &Timestamp) -> String {
    let time = ts.time();
    format!(" {:02}:{:02}", time.hour(), time.minute())
}

/// A sentinel symbol, or the date followed by `time_suffix`.
fn format_endpoint(ts: &Timestamp, time_suffix: &str, month_style: MonthStyle) -> String {
    if ts.is_min() {
        return "<".to_string();
    }
    if ts.is_max() {
        return ">".to_string();
    }
    format!("{}{}", format_date(ts.date(), month_style), time_suffix)
}

fn format_date(date: NaiveDate, month_style: MonthStyle) -> String {
    match month_style {
        MonthStyle::Numeric => format!("{} {} {}", date.day(), date.month(), date.year()),
        MonthStyle::Short => date.format("%-d %b %Y").to_string(),
        MonthStyle::Long => date.format("%-d %B %Y").to_string(),
    }
}
