// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Allergen matching and reporting engine.
//!
//! Raw menu text flows through the pipeline:
//! - [`pattern`]: whole-word, plural-tolerant matching per allergen term
//! - [`highlight`]: display-safe rendering with every match marked
//! - [`report`]: immutable [`ScanReport`] built from one scan
//! - [`history`]: bounded, persisted log of reports with aggregates
//!
//! A [`Session`] owns the state and is the entry point for presentation layers.

pub mod acquire;
pub mod allergen;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod highlight;
pub mod history;
pub mod output;
pub mod pattern;
pub mod report;
pub mod session;
pub mod storage;

pub use acquire::{Acquired, AcquisitionError, AcquisitionSource};
pub use allergen::{AllergenError, AllergenSet, AllergenTerm};
pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use event::{Notification, Progress, SessionEvent, Severity};
pub use highlight::HighlightStyle;
pub use history::{Aggregates, HistoryStore};
pub use pattern::{Occurrence, TermMatcher};
pub use report::{ConfidenceSource, ReportBuilder, ScanError, ScanReport};
pub use session::{ScanOutcome, Session};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

#[cfg(test)]
pub mod test_utils;
