// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scan reports.
//!
//! A [`ScanReport`] is the immutable record of one analysis: which declared
//! allergens the text mentions, on which lines, and how the text renders
//! with matches marked. Changing the allergen set never edits a report; it
//! derives a new one from the stored source text.

use std::time::Instant;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::allergen::{AllergenSet, AllergenTerm};
use crate::highlight::{self, HighlightStyle};
use crate::pattern::{Occurrence, TermMatcher};

/// Default minimum number of non-whitespace characters for usable text.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 10;

/// Lower bound of the estimated confidence range.
const ESTIMATE_FLOOR: u32 = 80;

/// Width of the estimated confidence range.
const ESTIMATE_SPAN: f64 = 20.0;

/// Punctuation common in menus, counted as legible when estimating confidence.
const MENU_PUNCTUATION: &str = ",.;:()[]-'\"&/%$!?•*+#@";

/// Acquired text was unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("no text detected ({found} characters, need at least {required})")]
    NoTextDetected { found: usize, required: usize },
}

/// Where a report's confidence figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceSource {
    /// Reported by the OCR backend.
    Measured,
    /// Estimated from the text because the backend gave none. Not ground truth.
    Estimated,
}

/// Immutable result of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    id: i64,
    source_text: String,
    highlighted_text: String,
    allergens_found: Vec<AllergenTerm>,
    warning_count: usize,
    #[serde(default)]
    occurrences: Vec<Occurrence>,
    confidence: u8,
    confidence_source: ConfidenceSource,
    processing_time_seconds: f64,
    created_at: DateTime<Local>,
}

impl ScanReport {
    /// Unique id (creation time in milliseconds unless assigned).
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The text as acquired. Never modified.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn highlighted_text(&self) -> &str {
        &self.highlighted_text
    }

    /// Distinct allergens present, in allergen-set order.
    pub fn allergens_found(&self) -> &[AllergenTerm] {
        &self.allergens_found
    }

    /// Number of (term, line) pairs with a match.
    ///
    /// Not deduplicated by term: one allergen on three lines counts three.
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Per-line locations behind `warning_count`.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// OCR confidence percentage in `[0, 100]`.
    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn confidence_source(&self) -> ConfidenceSource {
        self.confidence_source
    }

    pub fn processing_time_seconds(&self) -> f64 {
        self.processing_time_seconds
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// True when no declared allergen was found.
    pub fn is_all_clear(&self) -> bool {
        self.warning_count == 0
    }

    /// Number of non-blank lines in the source text.
    pub fn menu_items(&self) -> usize {
        self.source_text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .count()
    }

    /// Local time of day, e.g. `14:05`.
    pub fn time_label(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }

    /// Local date, e.g. `2026-10-17`.
    pub fn date_label(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }

    /// Plain-text summary suitable for sharing.
    pub fn share_text(&self) -> String {
        let allergens = if self.allergens_found.is_empty() {
            "none".to_string()
        } else {
            join_terms(&self.allergens_found)
        };
        format!(
            "AllerScan Results:\nWarnings: {}\nAllergens: {}",
            self.warning_count, allergens
        )
    }
}

/// Builds a [`ScanReport`] from text and an allergen set.
#[derive(Debug, Clone)]
pub struct ReportBuilder<'a> {
    allergens: &'a AllergenSet,
    style: HighlightStyle,
    min_text_chars: usize,
    confidence: Option<f64>,
    started: Option<Instant>,
    created_at: Option<DateTime<Local>>,
    id: Option<i64>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(allergens: &'a AllergenSet) -> Self {
        Self {
            allergens,
            style: HighlightStyle::default(),
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            confidence: None,
            started: None,
            created_at: None,
            id: None,
        }
    }

    pub fn style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    pub fn min_text_chars(mut self, min: usize) -> Self {
        self.min_text_chars = min;
        self
    }

    /// OCR confidence as a percentage; clamped to `[0, 100]`.
    pub fn confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }

    /// When the pipeline started (defaults to when `build` is called).
    pub fn started(mut self, started: Instant) -> Self {
        self.started = Some(started);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Local>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Analyze `text` and produce a report.
    ///
    /// Fails only when the text is blank or shorter than the minimum; zero
    /// matches is an "all clear" report.
    pub fn build(self, text: &str) -> Result<ScanReport, ScanError> {
        let started = self.started.unwrap_or_else(Instant::now);

        let found = text.chars().filter(|c| !c.is_whitespace()).count();
        if found == 0 || found < self.min_text_chars {
            return Err(ScanError::NoTextDetected {
                found,
                required: self.min_text_chars.max(1),
            });
        }

        let matcher = TermMatcher::new(self.allergens);
        let occurrences = matcher.find_occurrences(text);
        let allergens_found: Vec<AllergenTerm> = self
            .allergens
            .iter()
            .filter(|term| occurrences.iter().any(|o| &o.term == *term))
            .cloned()
            .collect();
        let highlighted_text = highlight::render_with(text, &matcher, &self.style);

        let (confidence, confidence_source) = match self.confidence {
            Some(measured) => (clamp_percent(measured), ConfidenceSource::Measured),
            None => (estimate_confidence(text), ConfidenceSource::Estimated),
        };

        let created_at = self.created_at.unwrap_or_else(Local::now);
        let id = self.id.unwrap_or_else(|| created_at.timestamp_millis());
        let processing_time_seconds = round_tenth(started.elapsed().as_secs_f64());

        tracing::debug!(
            "scan {}: {} warning(s), {} allergen(s) found in {}s",
            id,
            occurrences.len(),
            allergens_found.len(),
            processing_time_seconds
        );

        Ok(ScanReport {
            id,
            source_text: text.to_string(),
            highlighted_text,
            allergens_found,
            warning_count: occurrences.len(),
            occurrences,
            confidence,
            confidence_source,
            processing_time_seconds,
            created_at,
        })
    }

    /// Build a new report from `previous`'s stored source text.
    ///
    /// A measured confidence carries over since the text is the same OCR
    /// output; an estimate is recomputed.
    pub fn rederive(self, previous: &ScanReport) -> Result<ScanReport, ScanError> {
        let confidence = match previous.confidence_source {
            ConfidenceSource::Measured => Some(f64::from(previous.confidence)),
            ConfidenceSource::Estimated => None,
        };
        self.confidence(confidence).build(&previous.source_text)
    }
}

/// Estimate OCR confidence when the backend reports none.
///
/// Maps the share of characters that look like legible menu text onto
/// `[80, 100]`. This is a placeholder, not a measurement.
pub fn estimate_confidence(text: &str) -> u8 {
    let mut total = 0usize;
    let mut legible = 0usize;
    for c in text.chars() {
        total += 1;
        if c.is_alphanumeric() || c.is_whitespace() || MENU_PUNCTUATION.contains(c) {
            legible += 1;
        }
    }
    if total == 0 {
        return ESTIMATE_FLOOR as u8;
    }
    let ratio = legible as f64 / total as f64;
    (ESTIMATE_FLOOR + (ratio * ESTIMATE_SPAN).round() as u32).min(100) as u8
}

fn clamp_percent(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Round to one decimal place.
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn join_terms(terms: &[AllergenTerm]) -> String {
    terms
        .iter()
        .map(AllergenTerm::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
