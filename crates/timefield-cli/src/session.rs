//! The interactive command loop.
//!
//! One command per line, selected by its first character. The current
//! working interval is printed in front of every prompt and is replaced only
//! by a successful `c` command.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use timefield_core::{
    format_interval_with_options, parse_interval_with_options, Interval, Task, TaskDuration,
    TaskList, TaskStore, TimefieldError,
};
use tracing::{debug, info};

use crate::config::Config;

/// Source of the real-world "now".
pub type Clock = fn() -> NaiveDateTime;

pub fn system_clock() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct Session {
    config: Config,
    store: TaskStore,
    tasks: TaskList,
    working: Interval,
    clock: Clock,
}

impl Session {
    /// Load the task list and start with today as the working interval.
    pub fn open(config: Config, clock: Clock) -> Result<Self> {
        let store = TaskStore::new(config.tasks_path.clone());
        let tasks = store
            .load()
            .with_context(|| format!("loading tasks from {}", store.path().display()))?;
        let working = Interval::today(clock()).context("computing today's interval")?;
        Ok(Self {
            config,
            store,
            tasks,
            working,
            clock,
        })
    }

    pub fn working_interval(&self) -> &Interval {
        &self.working
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Run until `q` or end of input, then save the task list. The save also
    /// happens when reading or writing the terminal fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        let result = self.command_loop(input, out);
        self.store.save(&self.tasks)?;
        result
    }

    fn command_loop<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "{} {}",
            self.text("application-title"),
            self.text("application-version")
        )?;
        writeln!(out, "{}", self.text("command-prompt"))?;

        loop {
            write!(out, "{} ", self.format(&self.working))?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                writeln!(out)?;
                break;
            };
            if !self.dispatch(&line, input, out)? {
                break;
            }
        }
        Ok(())
    }

    /// Handle one command line. Returns `false` when the session should end.
    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<bool> {
        let mut chars = line.chars();
        let command = chars.next();
        let rest = chars.as_str();
        debug!(?command, rest, "command");

        match command {
            Some('l') => self.list(out)?,
            Some('c') => self.change_interval(rest, out)?,
            Some('n') => return self.new_task(input, out),
            Some('d') => self.delete_task(rest, out)?,
            Some('p') => self.print_task(rest, out)?,
            Some('h') => writeln!(out, "{}", self.text("help"))?,
            Some('q') => return Ok(false),
            _ => writeln!(out, "{}", self.text("invalid-command-error"))?,
        }
        Ok(true)
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        for (index, task) in self.tasks.iter_within(&self.working) {
            writeln!(out, "{}\t{}", index, task.title)?;
        }
        Ok(())
    }

    fn change_interval<W: Write>(&mut self, text: &str, out: &mut W) -> Result<()> {
        match self.parse(text) {
            Ok(interval) => {
                info!(interval = %self.format(&interval), "working interval changed");
                self.working = interval;
            }
            Err(err) => {
                debug!(error = %err, "working interval unchanged");
                writeln!(out, "{}", self.text("invalid-interval-error"))?;
            }
        }
        Ok(())
    }

    /// Prompt for the fields of a new task. Returns `false` on end of input.
    fn new_task<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<bool> {
        writeln!(out, "{}", self.text("new-task-prompt"))?;

        let mut answers = Vec::with_capacity(4);
        for key in ["title-prompt", "notes-prompt", "interval-prompt", "duration-prompt"] {
            match prompt(input, out, self.text(key), "")? {
                Some(answer) => answers.push(answer),
                None => {
                    writeln!(out)?;
                    return Ok(false);
                }
            }
        }
        let [title, notes, interval_text, duration_text]: [String; 4] = answers
            .try_into()
            .map_err(|_| anyhow::anyhow!("expected four task fields"))?;

        let task = self.parse(&interval_text).and_then(|interval| {
            let duration = TaskDuration::parse(&duration_text)?;
            Ok(Task::new(title, notes, interval, duration))
        });
        match task {
            Ok(task) => {
                let index = self.tasks.add(task);
                info!(index, "task created");
            }
            Err(err) => {
                debug!(error = %err, "task not created");
                writeln!(out, "{}", self.text("invalid-input-error"))?;
            }
        }
        Ok(true)
    }

    fn delete_task<W: Write>(&mut self, text: &str, out: &mut W) -> Result<()> {
        match parse_task_index(text).and_then(|index| self.tasks.remove(index)) {
            Ok(task) => info!(title = %task.title, "task deleted"),
            Err(err) => {
                debug!(error = %err, "delete failed");
                writeln!(out, "{}", self.text("invalid-task-error"))?;
            }
        }
        Ok(())
    }

    fn print_task<W: Write>(&self, text: &str, out: &mut W) -> Result<()> {
        match parse_task_index(text).and_then(|index| self.tasks.get(index)) {
            Ok(task) => writeln!(out, "{}", task.detail_lines(&self.config.format_options))?,
            Err(err) => {
                debug!(error = %err, "print failed");
                writeln!(out, "{}", self.text("invalid-task-error"))?;
            }
        }
        Ok(())
    }

    fn parse(&self, text: &str) -> Result<Interval, TimefieldError> {
        parse_interval_with_options(
            text,
            &self.working,
            (self.clock)(),
            &self.config.parse_options,
        )
    }

    fn format(&self, interval: &Interval) -> String {
        format_interval_with_options(interval, &self.config.format_options)
    }

    fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.config.strings.get(key)
    }
}

/// Read one line without its terminator; `None` at end of input. Bytes that
/// are not UTF-8 become U+FFFD.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&bytes);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Print `text[default]: ` and read the answer, using `default` if it is empty.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    text: &str,
    default: &str,
) -> Result<Option<String>> {
    write!(out, "{text}[{default}]: ")?;
    out.flush()?;
    Ok(read_line(input)?.map(|answer| {
        if answer.is_empty() {
            default.to_string()
        } else {
            answer
        }
    }))
}

/// A task number typed after the command letter. Range checks are left to
/// the task list.
fn parse_task_index(text: &str) -> Result<usize, TimefieldError> {
    text.trim()
        .parse()
        .map_err(|_| TimefieldError::InvalidTaskIndex(0))
}
