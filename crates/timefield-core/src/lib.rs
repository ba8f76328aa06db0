//! # timefield-core
//!
//! Interval parsing and formatting for the TimeField task scheduler.
//!
//! A user navigates a *working interval*, a sliding window of calendar time,
//! with short commands such as `today`, `next week`, `3/15` or
//! `3/15 9:00 - 3/15 17:00`. This crate turns that text into validated
//! [`Interval`]s and renders intervals back into the bracketed display form.
//! It also holds the small task model the command-line front end manages.
//!
//! ## Modules
//!
//! - [`parse`]: interval and date-time parsing relative to the working interval
//! - [`format`]: interval display (`[15 3 2011]`, `[< - 1 3 2012]`, ...)
//! - [`timestamp`]: minute-resolution timestamps with `<`/`>` sentinels
//! - [`interval`]: validated `[begin, end)` spans
//! - [`task`]: tasks and effort estimates
//! - [`task_list`]: the 1-indexed task list
//! - [`store`]: JSON persistence of the task list
//! - [`strings`]: localizable user-facing text and shortcut words
//! - [`error`]: Error types

pub mod error;
pub mod format;
pub mod interval;
pub mod parse;
pub mod store;
pub mod strings;
pub mod task;
pub mod task_list;
pub mod timestamp;

pub use error::TimefieldError;
pub use format::{format_interval, format_interval_with_options, FormatOptions, MonthStyle};
pub use interval::Interval;
pub use parse::{
    parse_date_time, parse_interval, parse_interval_with_options, Keywords, ParseOptions,
    WeekStartDay,
};
pub use store::TaskStore;
pub use strings::StringTable;
pub use task::{Task, TaskDuration};
pub use task_list::TaskList;
pub use timestamp::Timestamp;
