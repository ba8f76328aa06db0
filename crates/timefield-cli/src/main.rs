//! `timefield`: interactive task scheduler.
//!
//! Reads one command per line from stdin. Diagnostics go to stderr through
//! `tracing`; stdout carries only the session itself.

mod config;
mod session;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Config};
use crate::session::{system_clock, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_cli(&cli)?;
    info!(tasks = %config.tasks_path.display(), "starting");

    let mut session = Session::open(config, system_clock)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(&mut stdin.lock(), &mut stdout.lock())?;

    info!(
        tasks = session.tasks().len(),
        working = ?session.working_interval(),
        "session ended"
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
