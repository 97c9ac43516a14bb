// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Allergen term matching.
//!
//! Each term compiles to a case-insensitive whole-word regex that also
//! accepts a single trailing "s". Matching is reported per line: one
//! [`Occurrence`] for every (term, line) pair with at least one hit.

pub mod matcher;

use serde::{Deserialize, Serialize};

use crate::allergen::{AllergenSet, AllergenTerm};
pub use matcher::{PatternError, PatternMatch, TermPattern};

/// One (term, line) match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Term that matched.
    pub term: AllergenTerm,
    /// 1-based line number.
    pub line_number: u32,
    /// The matching line, trimmed.
    pub line_text: String,
}

/// Compiled patterns for an ordered list of terms.
///
/// Built once per allergen snapshot and shared by the line matcher and the
/// highlight renderer so both apply the same rule.
#[derive(Debug, Clone, Default)]
pub struct TermMatcher {
    patterns: Vec<TermPattern>,
}

impl TermMatcher {
    /// Compile patterns for `terms`, preserving their order.
    ///
    /// A term whose pattern cannot be compiled is skipped with a warning and
    /// never reported as found.
    pub fn new<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a AllergenTerm>,
    {
        let patterns = terms
            .into_iter()
            .filter_map(|term| match TermPattern::compile(term) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("skipping allergen {:?}: {}", term.as_str(), e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[TermPattern] {
        &self.patterns
    }

    /// Find every (term, line) pair with at least one match.
    ///
    /// Terms are processed in order; within a term, lines in text order.
    pub fn find_occurrences(&self, text: &str) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        for pattern in &self.patterns {
            for (index, line) in text.lines().enumerate() {
                if pattern.is_match(line) {
                    occurrences.push(Occurrence {
                        term: pattern.term().clone(),
                        line_number: index as u32 + 1,
                        line_text: line.trim().to_string(),
                    });
                }
            }
        }
        occurrences
    }

    /// Every match span of every term in `text`, unsorted and possibly overlapping.
    pub fn find_spans(&self, text: &str) -> Vec<PatternMatch> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.find_all(text))
            .collect()
    }
}

/// Match `text` against every term of `allergens`.
pub fn find_occurrences(text: &str, allergens: &AllergenSet) -> Vec<Occurrence> {
    TermMatcher::new(allergens).find_occurrences(text)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
