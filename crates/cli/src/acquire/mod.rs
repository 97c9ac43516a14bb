// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text acquisition.
//!
//! An acquisition source turns some external input (a photo run through
//! OCR, a file, a bundled demo menu) into raw text plus an optional
//! confidence figure. Matching never happens here.

use std::path::PathBuf;

use crate::event::EventSink;

mod demo;
mod file;

pub use demo::{DEMO_MENUS, DemoMenu, SIMULATED_MENUS, SimulatedOcr, StaticText};
pub use file::{DEFAULT_MAX_FILE_BYTES, ReaderSource, TextFileSource};

/// Raw text obtained from a source.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquired {
    pub raw_text: String,
    /// OCR confidence percentage, if the backend reported one.
    pub confidence: Option<f64>,
}

impl Acquired {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Failure to obtain text from a source.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    /// The user or platform refused access to the device.
    #[error("{0} access denied")]
    Denied(String),

    /// The device is not supported here.
    #[error("{0} is not supported on this device")]
    Unsupported(String),

    /// The file is not something text can be read from.
    #[error("unsupported file {}: {reason}", .path.display())]
    UnsupportedFile { path: PathBuf, reason: String },

    /// The file exceeds the size limit.
    #[error("{} is too large ({size} bytes, limit {max_size})", .path.display())]
    TooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// The source is gone or never existed.
    #[error("{0} is unavailable")]
    Unavailable(String),

    #[error("unknown demo menu {requested} (choose 1 to {available})")]
    UnknownDemo { requested: usize, available: usize },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can produce raw text for a scan.
pub trait AcquisitionSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Obtain text, reporting progress on `events`.
    fn acquire(&mut self, events: &EventSink) -> Result<Acquired, AcquisitionError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
