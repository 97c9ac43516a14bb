// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! AllerScan CLI entry point.

use std::path::Path;

use clap::{CommandFactory, Parser};
use crossbeam_channel::Receiver;
use tracing_subscriber::{EnvFilter, fmt};

use allerscan::cli::{Cli, Command};
use allerscan::config::{self, Config};
use allerscan::error::ExitCode;
use allerscan::{FileStorage, Session, SessionEvent, Severity};

mod cmd_allergens;
mod cmd_history;
mod cmd_scan;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("ALLERSCAN_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("allerscan: {}", e);
            match e.downcast_ref::<allerscan::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Scan(args)) => cmd_scan::run(&cli, args),
        Some(Command::Rederive(args)) => cmd_scan::rederive(&cli, args),
        Some(Command::Allergens(args)) => cmd_allergens::run(&cli, args),
        Some(Command::History(args)) => cmd_history::run(&cli, args),
        Some(Command::Stats(args)) => cmd_history::stats(&cli, args),
    }
}

/// Load config and open a session over the data directory.
///
/// Returns the session with a subscribed event receiver.
pub(crate) fn open_session(cli: &Cli) -> anyhow::Result<(Session, Receiver<SessionEvent>)> {
    let cwd = std::env::current_dir()?;
    let config_path = config::resolve(cli.config.as_deref(), &cwd)?;

    let config = match &config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load(path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => {
            let base = config_path
                .as_deref()
                .and_then(Path::parent)
                .unwrap_or(&cwd);
            config.data_dir(base)
        }
    };
    tracing::debug!("data directory: {}", data_dir.display());

    let mut session = Session::open(&config, Box::new(FileStorage::new(data_dir)));
    let events = session.subscribe();
    Ok((session, events))
}

/// Print warning notices (failed saves) to stderr.
///
/// Progress and other notices are meant for interactive surfaces.
pub(crate) fn print_warnings(events: &Receiver<SessionEvent>) {
    for event in events.try_iter() {
        if let SessionEvent::Notice(notice) = event
            && notice.severity == Severity::Warning
        {
            eprintln!("allerscan: warning: {}", notice.message);
        }
    }
}
