// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text from files and readers.

use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use super::{Acquired, AcquisitionError, AcquisitionSource};
use crate::event::EventSink;

/// Largest input accepted (5 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Reads OCR output saved as a text file.
#[derive(Debug, Clone)]
pub struct TextFileSource {
    path: PathBuf,
    max_bytes: u64,
    confidence: Option<f64>,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: DEFAULT_MAX_FILE_BYTES,
            confidence: None,
        }
    }

    pub fn max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Confidence the OCR tool reported for this text.
    pub fn confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AcquisitionSource for TextFileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn acquire(&mut self, events: &EventSink) -> Result<Acquired, AcquisitionError> {
        events.progress("Processing image...", 20);

        let meta = fs::metadata(&self.path).map_err(|e| self.io_error(e))?;
        if meta.is_dir() {
            return Err(AcquisitionError::UnsupportedFile {
                path: self.path.clone(),
                reason: "is a directory".to_string(),
            });
        }
        if meta.len() > self.max_bytes {
            return Err(AcquisitionError::TooLarge {
                path: self.path.clone(),
                size: meta.len(),
                max_size: self.max_bytes,
            });
        }

        let bytes = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        let raw_text = String::from_utf8(bytes).map_err(|_| AcquisitionError::UnsupportedFile {
            path: self.path.clone(),
            reason: "not UTF-8 text".to_string(),
        })?;
        tracing::debug!("read {} bytes from {}", raw_text.len(), self.path.display());

        events.progress("OCR complete!", 80);
        Ok(Acquired {
            raw_text,
            confidence: self.confidence,
        })
    }
}

impl TextFileSource {
    fn io_error(&self, source: std::io::Error) -> AcquisitionError {
        if source.kind() == ErrorKind::NotFound {
            AcquisitionError::Unavailable(self.path.display().to_string())
        } else {
            AcquisitionError::Io {
                path: self.path.clone(),
                source,
            }
        }
    }
}

/// Reads text from any reader, such as stdin.
pub struct ReaderSource<R> {
    reader: R,
    label: PathBuf,
    max_bytes: u64,
    confidence: Option<f64>,
}

impl<R: Read> ReaderSource<R> {
    /// `label` names the reader in errors (e.g. `-` for stdin).
    pub fn new(reader: R, label: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            label: label.into(),
            max_bytes: DEFAULT_MAX_FILE_BYTES,
            confidence: None,
        }
    }

    pub fn max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn confidence(mut self, confidence: Option<f64>) -> Self {
        self.confidence = confidence;
        self
    }
}

impl<R: Read> AcquisitionSource for ReaderSource<R> {
    fn name(&self) -> &str {
        "reader"
    }

    fn acquire(&mut self, events: &EventSink) -> Result<Acquired, AcquisitionError> {
        events.progress("Processing image...", 20);

        let mut bytes = Vec::new();
        (&mut self.reader)
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|source| AcquisitionError::Io {
                path: self.label.clone(),
                source,
            })?;
        let size = bytes.len() as u64;
        if size > self.max_bytes {
            return Err(AcquisitionError::TooLarge {
                path: self.label.clone(),
                size,
                max_size: self.max_bytes,
            });
        }

        let raw_text = String::from_utf8(bytes).map_err(|_| AcquisitionError::UnsupportedFile {
            path: self.label.clone(),
            reason: "not UTF-8 text".to_string(),
        })?;

        events.progress("OCR complete!", 80);
        Ok(Acquired {
            raw_text,
            confidence: self.confidence,
        })
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
