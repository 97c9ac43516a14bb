// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The user's declared allergen terms.
//!
//! Terms are normalized on entry (trimmed, lowercased, inner whitespace
//! collapsed) so that equality is case- and whitespace-insensitive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage key for the persisted allergen list.
pub const ALLERGENS_KEY: &str = "allerscan_allergens";

/// Terms used when nothing has been persisted yet.
pub const DEFAULT_ALLERGENS: &[&str] = &["nuts", "dairy", "gluten"];

/// Rejected allergen input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllergenError {
    #[error("please enter an allergen")]
    Empty,

    #[error("allergen already added: {0}")]
    Duplicate(String),
}

/// A single normalized allergen keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AllergenTerm(String);

impl AllergenTerm {
    /// Normalize raw input into a term.
    pub fn parse(input: &str) -> Result<Self, AllergenError> {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return Err(AllergenError::Empty);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AllergenTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AllergenTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AllergenTerm {
    type Error = AllergenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AllergenTerm> for String {
    fn from(term: AllergenTerm) -> Self {
        term.0
    }
}

/// Trim, lowercase, and collapse inner whitespace runs to a single space.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered, duplicate-free list of allergen terms.
///
/// Insertion order is preserved for display and drives the order of
/// `allergens_found` in scan reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllergenSet {
    terms: Vec<AllergenTerm>,
}

impl AllergenSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the built-in default set.
    pub fn with_defaults() -> Self {
        Self::from_terms(DEFAULT_ALLERGENS)
    }

    /// Build a set from raw strings, skipping empty and duplicate entries.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for raw in terms {
            if let Err(e) = set.add(raw.as_ref()) {
                tracing::debug!("skipping allergen {:?}: {}", raw.as_ref(), e);
            }
        }
        set
    }

    /// Parse a persisted JSON array of terms.
    ///
    /// Entries are normalized again, so hand-edited data with stray
    /// whitespace or duplicates loads cleanly.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::from_terms(raw))
    }

    /// Serialize as a JSON array of strings.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Add a term, returning the normalized form.
    pub fn add(&mut self, input: &str) -> Result<AllergenTerm, AllergenError> {
        let term = AllergenTerm::parse(input)?;
        if self.terms.contains(&term) {
            return Err(AllergenError::Duplicate(term.0));
        }
        self.terms.push(term.clone());
        Ok(term)
    }

    /// Remove a term, returning it if it was present.
    pub fn remove(&mut self, input: &str) -> Option<AllergenTerm> {
        let term = AllergenTerm::parse(input).ok()?;
        let index = self.terms.iter().position(|t| *t == term)?;
        Some(self.terms.remove(index))
    }

    pub fn contains(&self, input: &str) -> bool {
        AllergenTerm::parse(input).is_ok_and(|term| self.terms.contains(&term))
    }

    pub fn terms(&self) -> &[AllergenTerm] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AllergenTerm> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<'a> IntoIterator for &'a AllergenSet {
    type Item = &'a AllergenTerm;
    type IntoIter = std::slice::Iter<'a, AllergenTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

#[cfg(test)]
#[path = "allergen_tests.rs"]
mod tests;
