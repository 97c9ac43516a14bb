// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! Report format:
//! ```text
//! scan <id>  <date> <time>  <seconds>s  confidence <pct>% (<source>)
//!
//! <menu text with [matches] marked>
//!
//! <n> warnings: <allergen>, <allergen>
//!   <line>: <allergen>: <line text>
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::FormatOptions;
use crate::allergen::AllergenSet;
use crate::color::scheme;
use crate::highlight::merged_spans;
use crate::history::Aggregates;
use crate::pattern::TermMatcher;
use crate::report::{ConfidenceSource, ScanReport, join_terms};

/// Text output formatter with color support.
pub struct TextFormatter<W = StandardStream> {
    out: W,
    options: FormatOptions,
}

impl TextFormatter {
    /// Create a formatter writing to stdout.
    pub fn new(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::with_writer(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn with_writer(out: W, options: FormatOptions) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a full report: header, marked text, warnings.
    pub fn write_report(&mut self, report: &ScanReport) -> std::io::Result<()> {
        self.write_header(report)?;
        writeln!(self.out)?;
        self.write_marked_text(report)?;
        writeln!(self.out)?;
        writeln!(self.out)?;
        self.write_warnings(report)
    }

    fn write_header(&mut self, report: &ScanReport) -> std::io::Result<()> {
        self.out.set_color(&scheme::heading())?;
        write!(self.out, "scan ")?;
        self.out.reset()?;
        self.out.set_color(&scheme::id())?;
        write!(self.out, "{}", report.id())?;
        self.out.reset()?;

        let source = match report.confidence_source() {
            ConfidenceSource::Measured => "measured",
            ConfidenceSource::Estimated => "estimated",
        };
        self.out.set_color(&scheme::meta())?;
        write!(
            self.out,
            "  {} {}  {:.1}s  confidence {}% ({})",
            report.date_label(),
            report.time_label(),
            report.processing_time_seconds(),
            report.confidence(),
            source
        )?;
        self.out.reset()?;
        writeln!(self.out)
    }

    /// Source text with each merged match span bracketed and colored.
    fn write_marked_text(&mut self, report: &ScanReport) -> std::io::Result<()> {
        let text = report.source_text().trim_end();
        let matcher = TermMatcher::new(report.allergens_found());
        let mut last = 0;
        for span in merged_spans(text, &matcher) {
            write!(self.out, "{}", &text[last..span.start])?;
            self.out.set_color(&scheme::allergen())?;
            write!(self.out, "[{}]", &text[span.clone()])?;
            self.out.reset()?;
            last = span.end;
        }
        write!(self.out, "{}", &text[last..])
    }

    fn write_warnings(&mut self, report: &ScanReport) -> std::io::Result<()> {
        if report.is_all_clear() {
            self.out.set_color(&scheme::all_clear())?;
            write!(self.out, "All clear")?;
            self.out.reset()?;
            return writeln!(
                self.out,
                ": no allergens found in {} menu items",
                report.menu_items()
            );
        }

        let count = report.warning_count();
        self.out.set_color(&scheme::warning())?;
        write!(
            self.out,
            "{} warning{}",
            count,
            if count == 1 { "" } else { "s" }
        )?;
        self.out.reset()?;
        writeln!(self.out, ": {}", join_terms(report.allergens_found()))?;

        for occurrence in report.occurrences() {
            write!(self.out, "  ")?;
            self.out.set_color(&scheme::line_number())?;
            write!(self.out, "{}", occurrence.line_number)?;
            self.out.reset()?;
            writeln!(
                self.out,
                ": {}: {}",
                occurrence.term,
                occurrence.line_text.trim()
            )?;
        }
        Ok(())
    }

    /// One allergen per line.
    pub fn write_allergens(&mut self, allergens: &AllergenSet) -> std::io::Result<()> {
        if allergens.is_empty() {
            return writeln!(self.out, "No allergens added");
        }
        for term in allergens {
            writeln!(self.out, "{}", term)?;
        }
        Ok(())
    }

    /// One line per report, newest first, up to the configured limit.
    pub fn write_history<'a, I>(&mut self, entries: I) -> std::io::Result<()>
    where
        I: ExactSizeIterator<Item = &'a ScanReport>,
    {
        let total = entries.len();
        if total == 0 {
            return writeln!(self.out, "No scans in history");
        }

        let shown = self.options.take(total);
        for report in entries.take(shown) {
            self.out.set_color(&scheme::id())?;
            write!(self.out, "{}", report.id())?;
            self.out.reset()?;
            self.out.set_color(&scheme::meta())?;
            write!(
                self.out,
                "  {} {}",
                report.date_label(),
                report.time_label()
            )?;
            self.out.reset()?;
            write!(self.out, "  ")?;
            if report.is_all_clear() {
                self.out.set_color(&scheme::all_clear())?;
                write!(self.out, "all clear")?;
                self.out.reset()?;
                writeln!(self.out)?;
            } else {
                let count = report.warning_count();
                self.out.set_color(&scheme::warning())?;
                write!(
                    self.out,
                    "{} warning{}",
                    count,
                    if count == 1 { "" } else { "s" }
                )?;
                self.out.reset()?;
                writeln!(self.out, ": {}", join_terms(report.allergens_found()))?;
            }
        }
        if shown < total {
            writeln!(self.out, "... {} more", total - shown)?;
        }
        Ok(())
    }

    pub fn write_stats(&mut self, aggregates: &Aggregates) -> std::io::Result<()> {
        writeln!(self.out, "Total scans: {}", aggregates.total_scans)?;
        writeln!(
            self.out,
            "Allergens found: {}",
            aggregates.total_allergens_found
        )?;
        writeln!(
            self.out,
            "Total scan time: {:.1}s",
            aggregates.total_scan_time
        )?;
        writeln!(
            self.out,
            "Average processing time: {:.1}s",
            aggregates.average_processing_time
        )
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
