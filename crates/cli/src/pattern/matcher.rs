//! Compiled whole-word matcher for a single allergen term.

use regex::Regex;

use crate::allergen::AllergenTerm;

/// A compiled pattern for one term.
#[derive(Debug, Clone)]
pub struct TermPattern {
    term: AllergenTerm,
    regex: Regex,
}

/// A match found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Byte offset where match starts.
    pub start: usize,
    /// Byte offset where match ends.
    pub end: usize,
}

/// Error during pattern compilation.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

impl TermPattern {
    /// Compile the whole-word, plural-tolerant pattern for `term`.
    pub fn compile(term: &AllergenTerm) -> Result<Self, PatternError> {
        let regex = Regex::new(&pattern_source(term.as_str()))?;
        Ok(Self {
            term: term.clone(),
            regex,
        })
    }

    pub fn term(&self) -> &AllergenTerm {
        &self.term
    }

    /// Check whether `content` contains at least one match.
    pub fn is_match(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }

    /// Find all matches in content.
    pub fn find_all(&self, content: &str) -> Vec<PatternMatch> {
        self.regex
            .find_iter(content)
            .map(|m| PatternMatch {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

/// Build the regex source for a normalized term.
///
/// - The term text is escaped, so metacharacters match literally.
/// - A word boundary is asserted on each edge that is a word character;
///   an edge like the `+` in `c++` has no boundary to anchor to.
/// - An optional trailing `s` follows terms that end in a word character.
/// - Spaces inside the term accept any run of non-newline whitespace.
pub(crate) fn pattern_source(term: &str) -> String {
    let starts_with_word = term.chars().next().is_some_and(is_word_char);
    let ends_with_word = term.chars().next_back().is_some_and(is_word_char);

    let body = term
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[^\S\r\n]+");

    let mut source = String::with_capacity(body.len() + 16);
    source.push_str("(?i)");
    if starts_with_word {
        source.push_str(r"\b");
    }
    source.push_str(&body);
    if ends_with_word {
        source.push_str(r"s?\b");
    }
    source
}

/// Word characters as the regex engine's Unicode `\b` sees them.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
