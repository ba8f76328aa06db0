//! Command-line arguments and the resolved runtime configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use timefield_core::{FormatOptions, MonthStyle, ParseOptions, StringTable, WeekStartDay};

#[derive(Parser, Debug)]
#[command(
    name = "timefield",
    version,
    about = "Personal task scheduler with a natural-language working interval"
)]
pub struct Cli {
    /// Task file (JSON). Defaults to <data dir>/timefield/tasks.json
    #[arg(long, env = "TIMEFIELD_TASKS", value_name = "PATH")]
    pub tasks: Option<PathBuf>,

    /// JSON object of string overrides for messages and shortcut words
    #[arg(long, env = "TIMEFIELD_STRINGS", value_name = "PATH")]
    pub strings: Option<PathBuf>,

    /// First day of the week for `prev/this/next week`
    #[arg(long, value_enum, default_value_t = WeekStartArg::Sunday)]
    pub week_start: WeekStartArg,

    /// How months are written in interval displays
    #[arg(long, value_enum, default_value_t = MonthStyleArg::Numeric)]
    pub month_style: MonthStyleArg,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeekStartArg {
    Sunday,
    Monday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MonthStyleArg {
    Numeric,
    Short,
    Long,
}

impl From<WeekStartArg> for WeekStartDay {
    fn from(arg: WeekStartArg) -> Self {
        match arg {
            WeekStartArg::Sunday => WeekStartDay::Sunday,
            WeekStartArg::Monday => WeekStartDay::Monday,
        }
    }
}

impl From<MonthStyleArg> for MonthStyle {
    fn from(arg: MonthStyleArg) -> Self {
        match arg {
            MonthStyleArg::Numeric => MonthStyle::Numeric,
            MonthStyleArg::Short => MonthStyle::Short,
            MonthStyleArg::Long => MonthStyle::Long,
        }
    }
}

/// Everything a session needs, resolved from the arguments.
#[derive(Debug, Clone)]
pub struct Config {
    pub tasks_path: PathBuf,
    pub strings: StringTable,
    pub parse_options: ParseOptions,
    pub format_options: FormatOptions,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let strings = match &cli.strings {
            Some(path) => StringTable::load(path)
                .with_context(|| format!("loading strings from {}", path.display()))?,
            None => StringTable::default(),
        };

        let parse_options = ParseOptions {
            week_start: cli.week_start.into(),
            keywords: strings.keywords(),
        };
        let format_options = FormatOptions {
            month_style: cli.month_style.into(),
        };

        Ok(Self {
            tasks_path: cli.tasks.clone().unwrap_or_else(default_tasks_path),
            strings,
            parse_options,
            format_options,
        })
    }
}

fn default_tasks_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("timefield"))
        .unwrap_or_default()
        .join("tasks.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["timefield", "--tasks", "/tmp/t.json"]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.tasks_path, PathBuf::from("/tmp/t.json"));
        assert_eq!(config.parse_options.week_start, WeekStartDay::Sunday);
        assert_eq!(config.format_options.month_style, MonthStyle::Numeric);
    }

    #[test]
    fn test_week_start_and_month_style() {
        let cli = Cli::parse_from([
            "timefield",
            "--week-start",
            "monday",
            "--month-style",
            "long",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.parse_options.week_start, WeekStartDay::Monday);
        assert_eq!(config.format_options.month_style, MonthStyle::Long);
    }

    #[test]
    fn test_default_tasks_path_file_name() {
        assert!(default_tasks_path().ends_with("tasks.json"));
    }

    #[test]
    fn test_missing_strings_file_is_an_error() {
        let cli = Cli::parse_from(["timefield", "--strings", "/nonexistent/strings.json"]);
        assert!(Config::from_cli(&cli).is_err());
    }
}
