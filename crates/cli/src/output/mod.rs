// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for reports, allergens and history.

pub mod json;
pub mod text;

/// Output formatting options.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Maximum history entries to show (None = unlimited).
    pub limit: Option<usize>,
}

impl FormatOptions {
    /// Create options with a specific limit.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }

    /// Apply the limit to `len` items.
    pub fn take(&self, len: usize) -> usize {
        self.limit.map_or(len, |limit| limit.min(len))
    }
}
