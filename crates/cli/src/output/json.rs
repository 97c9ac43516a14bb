// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! Each command writes one pretty-printed document.

use std::io::Write;

use serde::Serialize;

use super::FormatOptions;
use crate::allergen::{AllergenSet, AllergenTerm};
use crate::history::Aggregates;
use crate::report::ScanReport;

/// A report plus its derived presentation fields.
#[derive(Debug, Serialize)]
pub struct ReportOutput<'a> {
    #[serde(flatten)]
    pub report: &'a ScanReport,
    pub all_clear: bool,
    pub menu_items: usize,
    pub share_text: String,
}

impl<'a> From<&'a ScanReport> for ReportOutput<'a> {
    fn from(report: &'a ScanReport) -> Self {
        Self {
            report,
            all_clear: report.is_all_clear(),
            menu_items: report.menu_items(),
            share_text: report.share_text(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AllergensOutput<'a> {
    allergens: &'a [AllergenTerm],
}

#[derive(Debug, Serialize)]
struct HistoryOutput<'a> {
    total: usize,
    entries: Vec<&'a ScanReport>,
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
    options: FormatOptions,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self { writer, options }
    }

    pub fn write_report(&mut self, report: &ScanReport) -> std::io::Result<()> {
        self.write_value(&ReportOutput::from(report))
    }

    pub fn write_allergens(&mut self, allergens: &AllergenSet) -> std::io::Result<()> {
        self.write_value(&AllergensOutput {
            allergens: allergens.terms(),
        })
    }

    /// Entries newest first, up to the configured limit; `total` counts all.
    pub fn write_history<'a, I>(&mut self, entries: I) -> std::io::Result<()>
    where
        I: ExactSizeIterator<Item = &'a ScanReport>,
    {
        let total = entries.len();
        let shown = self.options.take(total);
        self.write_value(&HistoryOutput {
            total,
            entries: entries.take(shown).collect(),
        })
    }

    pub fn write_stats(&mut self, aggregates: &Aggregates) -> std::io::Result<()> {
        self.write_value(aggregates)
    }

    fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
