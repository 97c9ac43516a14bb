// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Allergens command implementation.

use allerscan::cli::{AllergensAction, AllergensArgs, Cli, OutputFormat};
use allerscan::color::resolve_color;
use allerscan::error::ExitCode;
use allerscan::output::FormatOptions;
use allerscan::output::json::JsonFormatter;
use allerscan::output::text::TextFormatter;

/// Run the allergens command.
///
/// Adding or removing several terms stops at the first rejected term;
/// earlier terms stay applied.
pub fn run(cli: &Cli, args: &AllergensArgs) -> anyhow::Result<ExitCode> {
    let (session, events) = crate::open_session(cli)?;

    let result = match &args.action {
        None | Some(AllergensAction::List) => Ok(()),
        Some(AllergensAction::Add { terms }) => terms
            .iter()
            .try_for_each(|term| session.add_allergen(term).map(drop)),
        Some(AllergensAction::Remove { terms }) => terms.iter().try_for_each(|term| {
            if session.remove_allergen(term)?.is_none() {
                eprintln!("allerscan: warning: not in your allergens: {}", term.trim());
            }
            Ok::<_, allerscan::Error>(())
        }),
        Some(AllergensAction::Reset) => session.reset_allergens(),
    };
    crate::print_warnings(&events);
    result?;

    let allergens = session.allergens();
    match args.output.output {
        OutputFormat::Text => {
            let color = resolve_color(args.output.color, args.output.no_color);
            TextFormatter::new(color, FormatOptions::default()).write_allergens(&allergens)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock(), FormatOptions::default())
                .write_allergens(&allergens)?;
        }
    }
    Ok(ExitCode::Success)
}
