// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! History and stats commands.

use allerscan::cli::{Cli, HistoryArgs, OutputFormat, StatsArgs};
use allerscan::color::resolve_color;
use allerscan::error::ExitCode;
use allerscan::output::FormatOptions;
use allerscan::output::json::JsonFormatter;
use allerscan::output::text::TextFormatter;

/// Run the history command.
pub fn run(cli: &Cli, args: &HistoryArgs) -> anyhow::Result<ExitCode> {
    let (session, events) = crate::open_session(cli)?;

    if args.clear {
        let cleared = session.clear_history();
        crate::print_warnings(&events);
        cleared?;
    }

    let options = FormatOptions { limit: args.limit };
    let history = session.history();
    match args.output.output {
        OutputFormat::Text => {
            let color = resolve_color(args.output.color, args.output.no_color);
            TextFormatter::new(color, options).write_history(history.entries())?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock(), options)
                .write_history(history.entries())?;
        }
    }
    Ok(ExitCode::Success)
}

/// Run the stats command.
pub fn stats(cli: &Cli, args: &StatsArgs) -> anyhow::Result<ExitCode> {
    let (session, _events) = crate::open_session(cli)?;
    let aggregates = session.aggregates();

    match args.output.output {
        OutputFormat::Text => {
            let color = resolve_color(args.output.color, args.output.no_color);
            TextFormatter::new(color, FormatOptions::default()).write_stats(&aggregates)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock(), FormatOptions::default())
                .write_stats(&aggregates)?;
        }
    }
    Ok(ExitCode::Success)
}
