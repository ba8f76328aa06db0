//! Interval and date-time parsing for working-interval commands.
//!
//! Converts the short textual forms a user types at the prompt into concrete
//! [`Interval`]s. All functions are pure: the caller passes both the current
//! working interval (context for relative shortcuts and the default year) and
//! the "now" anchor, so nothing here reads the system clock.
//!
//! # Grammar
//!
//! An interval is one of, tried in this order:
//!
//! - **Explicit range** `<side> - <side>`: each side is a date-time (see
//!   [`parse_date_time`]), including the open-ended sentinels `<` and `>`.
//! - **Single date** `M/D` or `M/D/Y`: the whole calendar day.
//! - **Shortcut phrase**: `today`, or `prev|this|next` followed by `day|week`.
//!   The six words come from [`Keywords`] so they can be localized.
//!
//! A date-time side is `<`, `>`, `now`, `M/D[/Y]`, `H:M`, or `M/D[/Y] H:M`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

use crate::error::TimefieldError;
use crate::interval::Interval;
use crate::timestamp::{Timestamp, MAX_YEAR, MIN_YEAR};

// ── Parse options ───────────────────────────────────────────────────────────

/// Which day begins a week for the `week` shortcuts.
///
/// The week start has weekday index 0; `this week` always begins on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStartDay {
    /// US/Canada convention (Sunday = day 0 of the week).
    #[default]
    Sunday,
    /// ISO 8601 standard (Monday = day 0 of the week).
    Monday,
}

/// The words recognized in shortcut phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    pub today: String,
    pub prev: String,
    pub this: String,
    pub next: String,
    pub day: String,
    pub week: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            today: "today".to_string(),
            prev: "prev".to_string(),
            this: "this".to_string(),
            next: "next".to_string(),
            day: "day".to_string(),
            week: "week".to_string(),
        }
    }
}

/// Options for [`parse_interval_with_options`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Which day starts the week for `prev/this/next week`.
    pub week_start: WeekStartDay,
    /// Localized shortcut words.
    pub keywords: Keywords,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
    }
}

// ── parse_date_time ─────────────────────────────────────────────────────────

/// Parse one side of an interval into a [`Timestamp`].
///
/// # Arguments
///
/// * `text`: `<`, `>`, `now`, a date `M/D[/Y]`, a time `H:M`, or a date and
///   time separated by a space
/// * `default_time`: time-of-day used when only a date is given
/// * `default_year`: year used when a date omits one
/// * `now`: the anchor for `now` and the date used when only a time is given
///
/// # Errors
///
/// Returns [`TimefieldError::InvalidDateTimeFormat`] if the text matches none
/// of the shapes above, a component is not an integer, or the date or time
/// does not exist on the calendar (years are limited to 1400..=9999).
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use timefield_core::parse::parse_date_time;
///
/// let now = NaiveDate::from_ymd_opt(2011, 12, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let ts = parse_date_time("3/15", NaiveTime::default(), 2011, now).unwrap();
/// assert_eq!(ts.to_storage_string(), "2011-03-15 00:00:00");
/// ```
pub fn parse_date_time(
    text: &str,
    default_time: NaiveTime,
    default_year: i32,
    now: NaiveDateTime,
) -> Result<Timestamp, TimefieldError> {
    let text = text.trim();
    match text {
        "<" => return Ok(Timestamp::min()),
        ">" => return Ok(Timestamp::max()),
        "now" => return Ok(Timestamp::from_naive(now)),
        _ => {}
    }

    let (date_part, time_part) = split_date_time(text)?;

    let date = match date_part {
        Some(s) => parse_date_part(s, default_year)?,
        None => now.date(),
    };
    let time = match time_part {
        Some(s) => parse_time_part(s)?,
        None => default_time,
    };

    Ok(Timestamp::from_date_time(date, time))
}

// ── parse_interval ──────────────────────────────────────────────────────────

/// Parse an interval command using the default [`ParseOptions`]
/// (Sunday week start, English shortcut words).
///
/// See [`parse_interval_with_options`] for the grammar.
pub fn parse_interval(
    text: &str,
    working: &Interval,
    now: NaiveDateTime,
) -> Result<Interval, TimefieldError> {
    parse_interval_with_options(text, working, now, &ParseOptions::default())
}

/// Parse an interval command relative to the current working interval.
///
/// # Arguments
///
/// * `text`: the command text (surrounding whitespace is ignored)
/// * `working`: the current working interval; its begin date anchors the
///   `prev/this/next` shortcuts and supplies the year for dates without one
/// * `now`: the real-world "now" used for `today`, `now`, and time-only sides
/// * `options`: week start and shortcut words
///
/// # Forms
///
/// | Input            | Result                                                  |
/// |------------------|---------------------------------------------------------|
/// | `a - b`          | `[a, b)`; a side with no time defaults to 00:00          |
/// | `M/D[/Y]`        | that whole day                                          |
/// | `today ...`      | the real current day; words after `today` are ignored   |
/// | `prev day`       | the day before the working interval's begin date        |
/// | `this day`       | the working interval's begin date                       |
/// | `next day`       | the day after the working interval's begin date         |
/// | `prev week`      | the week before the one containing the begin date       |
/// | `this week`      | the week containing the begin date                      |
/// | `next week`      | the week after the one containing the begin date        |
///
/// The end side of an explicit range also defaults to 00:00, so `3/15 - 3/16`
/// covers only 15 March.
///
/// # Errors
///
/// Returns [`TimefieldError::InvalidInterval`] if no form matches, a side
/// fails to parse (the inner error message is kept), `begin > end`, or an
/// endpoint lies outside `[MIN, MAX]`. The working interval is never touched;
/// the caller decides whether to replace it.
pub fn parse_interval_with_options(
    text: &str,
    working: &Interval,
    now: NaiveDateTime,
    options: &ParseOptions,
) -> Result<Interval, TimefieldError> {
    let input = text.trim();

    let result = if let Some((begin_text, end_text)) = input.split_once('-') {
        parse_explicit_range(begin_text.trim(), end_text.trim(), working, now)
    } else if input.contains('/') {
        parse_single_date(input, working)
    } else {
        parse_shortcut(input, working, now, options)
    };

    match result {
        Ok(interval) => {
            debug!(
                input,
                begin = %interval.begin(),
                end = %interval.end(),
                "parsed interval"
            );
            Ok(interval)
        }
        Err(err) => {
            debug!(input, error = %err, "rejected interval");
            Err(match err {
                TimefieldError::InvalidInterval(msg) => TimefieldError::InvalidInterval(msg),
                other => TimefieldError::InvalidInterval(format!("'{}': {}", input, other)),
            })
        }
    }
}

// ── Interval forms ──────────────────────────────────────────────────────────

/// `begin - end`; both sides default to midnight and the working year.
fn parse_explicit_range(
    begin_text: &str,
    end_text: &str,
    working: &Interval,
    now: NaiveDateTime,
) -> Result<Interval, TimefieldError> {
    let default_year = working.begin().year();
    let midnight = NaiveTime::default();

    let begin = parse_date_time(begin_text, midnight, default_year, now)?;
    // Same default as the begin side: an end date without a time is midnight
    // at the start of that date, not the end of it.
    let end = parse_date_time(end_text, midnight, default_year, now)?;

    Interval::new(begin, end)
}

/// `M/D` or `M/D/Y` as one full day.
fn parse_single_date(input: &str, working: &Interval) -> Result<Interval, TimefieldError> {
    let date = parse_date_part(input, working.begin().year())?;
    Interval::day(date)
}

/// Two-word relative phrases anchored on the working interval's begin date.
fn parse_shortcut(
    input: &str,
    working: &Interval,
    now: NaiveDateTime,
    options: &ParseOptions,
) -> Result<Interval, TimefieldError> {
    let kw = &options.keywords;
    let unknown =
        || TimefieldError::InvalidInterval(format!("unrecognized interval: '{}'", input));

    // Only the first space separates the words; `today` ignores the rest.
    let (first, second) = match input.split_once(' ') {
        Some((first, second)) => (first, Some(second)),
        None => (input, None),
    };
    if first == kw.today {
        return Interval::today(now);
    }
    let second = second.ok_or_else(unknown)?;

    let begin_date = working.begin().date();
    let day_of_week = days_from_week_start(begin_date.weekday(), options.week_start);

    // (offset in days from the begin date, length in days)
    let (offset, length) = if second == kw.day {
        let offset = if first == kw.prev {
            -1
        } else if first == kw.this {
            0
        } else if first == kw.next {
            1
        } else {
            return Err(unknown());
        };
        (offset, 1)
    } else if second == kw.week {
        let week_start = -day_of_week;
        let offset = if first == kw.prev {
            week_start - 7
        } else if first == kw.this {
            week_start
        } else if first == kw.next {
            week_start + 7
        } else {
            return Err(unknown());
        };
        (offset, 7)
    } else {
        return Err(unknown());
    };

    let begin = Timestamp::from_date(begin_date)
        .checked_add_days(offset)
        .ok_or_else(unknown)?;
    Interval::days_from(begin, length)
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

/// Split a date-time side into its optional date and time parts.
///
/// With a space, the text before the first space is the date and the rest is
/// the time. Without one, a `/` marks a date and a `:` marks a time.
fn split_date_time(text: &str) -> Result<(Option<&str>, Option<&str>), TimefieldError> {
    if let Some((date, time)) = text.split_once(' ') {
        return Ok((Some(date.trim()), Some(time.trim())));
    }
    if text.contains('/') {
        Ok((Some(text), None))
    } else if text.contains(':') {
        Ok((None, Some(text)))
    } else {
        Err(TimefieldError::InvalidDateTimeFormat(format!(
            "expected a date (M/D[/Y]) or a time (H:M): '{}'",
            text
        )))
    }
}

/// Parse `M/D` or `M/D/Y`, using `default_year` when the year is omitted.
fn parse_date_part(s: &str, default_year: i32) -> Result<NaiveDate, TimefieldError> {
    let mut parts = s.splitn(3, '/');
    let month: u32 = parse_component(parts.next(), s)?;
    let day: u32 = parse_component(parts.next(), s)?;
    let year: i32 = match parts.next() {
        Some(y) => parse_component(Some(y), s)?,
        None => default_year,
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TimefieldError::InvalidDateTimeFormat(format!(
            "year {} out of range {}..={} in '{}'",
            year, MIN_YEAR, MAX_YEAR, s
        )));
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        TimefieldError::InvalidDateTimeFormat(format!("no such date {}/{}/{}", month, day, year))
    })
}

/// Parse `H:M`; seconds are always zero.
fn parse_time_part(s: &str) -> Result<NaiveTime, TimefieldError> {
    let mut parts = s.splitn(2, ':');
    let hours: u32 = parse_component(parts.next(), s)?;
    let minutes: u32 = parse_component(parts.next(), s)?;

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(|| {
        TimefieldError::InvalidDateTimeFormat(format!("no such time {}:{:02}", hours, minutes))
    })
}

/// Parse one numeric component, reporting the whole `source` on failure.
fn parse_component<T: std::str::FromStr>(
    part: Option<&str>,
    source: &str,
) -> Result<T, TimefieldError> {
    part.and_then(|p| p.parse().ok()).ok_or_else(|| {
        TimefieldError::InvalidDateTimeFormat(format!("invalid number in '{}'", source))
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
