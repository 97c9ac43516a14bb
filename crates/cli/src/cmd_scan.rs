// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scan and rederive commands.

use std::io::IsTerminal;
use std::path::Path;

use allerscan::acquire::{DemoMenu, ReaderSource, SimulatedOcr, TextFileSource};
use allerscan::cli::{Cli, OutputArgs, OutputFormat, RederiveArgs, ScanArgs};
use allerscan::color::resolve_color;
use allerscan::error::{Error, ExitCode};
use allerscan::output::FormatOptions;
use allerscan::output::json::JsonFormatter;
use allerscan::output::text::TextFormatter;
use allerscan::{AcquisitionSource, ScanOutcome, ScanReport};

/// Run the scan command.
pub fn run(cli: &Cli, args: &ScanArgs) -> anyhow::Result<ExitCode> {
    if let Some(confidence) = args.confidence
        && !(0.0..=100.0).contains(&confidence)
    {
        return Err(Error::Argument(format!(
            "--confidence must be between 0 and 100, got {}",
            confidence
        ))
        .into());
    }

    let (session, events) = crate::open_session(cli)?;
    let max_bytes = session.config().scan.max_file_bytes;

    let mut source: Box<dyn AcquisitionSource> = match (&args.path, args.demo) {
        (Some(path), _) if path == Path::new("-") => {
            if std::io::stdin().is_terminal() {
                eprintln!("allerscan: reading menu text from stdin (Ctrl-D to finish)");
            }
            Box::new(
                ReaderSource::new(std::io::stdin().lock(), "-")
                    .max_bytes(max_bytes)
                    .confidence(args.confidence),
            )
        }
        (Some(path), _) => Box::new(
            TextFileSource::new(path)
                .max_bytes(max_bytes)
                .confidence(args.confidence),
        ),
        (None, Some(number)) => {
            Box::new(DemoMenu::new(number).map_err(|e| Error::Argument(e.to_string()))?)
        }
        (None, None) if args.simulate => Box::new(SimulatedOcr::new(seed())),
        (None, None) => {
            return Err(Error::Argument(
                "nothing to scan: pass a PATH, `-` for stdin, --demo N or --simulate".to_string(),
            )
            .into());
        }
    };

    let outcome = session.scan(&mut *source);
    crate::print_warnings(&events);

    match outcome? {
        ScanOutcome::Completed(report) => {
            write_report(&report, &args.output)?;
            Ok(exit_code(&report))
        }
        ScanOutcome::Busy => Err(Error::Internal("scan already in progress".to_string()).into()),
    }
}

/// Run the rederive command.
pub fn rederive(cli: &Cli, args: &RederiveArgs) -> anyhow::Result<ExitCode> {
    let (session, events) = crate::open_session(cli)?;
    let report = session.rederive_from(args.id)?;
    if args.save {
        session.save_current()?;
    }
    crate::print_warnings(&events);

    write_report(&report, &args.output)?;
    Ok(exit_code(&report))
}

fn write_report(report: &ScanReport, output: &OutputArgs) -> anyhow::Result<()> {
    match output.output {
        OutputFormat::Text => {
            let color = resolve_color(output.color, output.no_color);
            TextFormatter::new(color, FormatOptions::default()).write_report(report)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock(), FormatOptions::default())
                .write_report(report)?;
        }
    }
    Ok(())
}

fn exit_code(report: &ScanReport) -> ExitCode {
    if report.is_all_clear() {
        ExitCode::Success
    } else {
        ExitCode::AllergensFound
    }
}

/// Seed for simulated OCR, varying per run.
fn seed() -> u64 {
    chrono::Utc::now().timestamp_subsec_nanos() as u64
}
