// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Highlighted rendering of scanned text.
//!
//! Spans from every term are collected against the original text and merged
//! before any marker is written, so overlapping matches of different terms
//! produce a single marker and marker text is never re-scanned.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::allergen::AllergenSet;
use crate::pattern::TermMatcher;

/// Marker strings wrapped around each highlighted span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    /// Inserted before a highlighted span.
    pub open: String,
    /// Inserted after a highlighted span.
    pub close: String,
    /// HTML-escape text outside and inside markers.
    pub escape_html: bool,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            open: r#"<span class="highlight">"#.to_string(),
            close: "</span>".to_string(),
            escape_html: true,
        }
    }
}

impl HighlightStyle {
    /// Plain-text brackets, no escaping.
    pub fn brackets() -> Self {
        Self {
            open: "[".to_string(),
            close: "]".to_string(),
            escape_html: false,
        }
    }
}

/// Render `text` with every match of `allergens` marked.
pub fn render(text: &str, allergens: &AllergenSet, style: &HighlightStyle) -> String {
    render_with(text, &TermMatcher::new(allergens), style)
}

/// Render `text` with every span found by `matcher` marked.
pub fn render_with(text: &str, matcher: &TermMatcher, style: &HighlightStyle) -> String {
    let spans = merged_spans(text, matcher);
    let markers = spans.len() * (style.open.len() + style.close.len());
    let mut out = String::with_capacity(text.len() + markers);

    let mut cursor = 0;
    for span in spans {
        push_text(&mut out, &text[cursor..span.start], style.escape_html);
        out.push_str(&style.open);
        push_text(&mut out, &text[span.clone()], style.escape_html);
        out.push_str(&style.close);
        cursor = span.end;
    }
    push_text(&mut out, &text[cursor..], style.escape_html);
    out
}

/// Sorted, non-overlapping byte ranges covering every match.
///
/// Overlapping or touching spans are merged into one.
pub fn merged_spans(text: &str, matcher: &TermMatcher) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = matcher
        .find_spans(text)
        .into_iter()
        .map(|m| m.start..m.end)
        .filter(|r| !r.is_empty())
        .collect();
    spans.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(last) = merged.last_mut()
            && span.start <= last.end
        {
            last.end = last.end.max(span.end);
            continue;
        }
        merged.push(span);
    }
    merged
}

fn push_text(out: &mut String, text: &str, escape_html: bool) {
    if !escape_html {
        out.push_str(text);
        return;
    }
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod tests;
