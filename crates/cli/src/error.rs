// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::acquire::AcquisitionError;
use crate::allergen::AllergenError;
use crate::report::ScanError;
use crate::storage::StorageError;

/// AllerScan error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rejected allergen input (empty or duplicate term).
    #[error(transparent)]
    InvalidAllergen(#[from] AllergenError),

    /// Text could not be obtained from the acquisition source.
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// Acquired text was unusable.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Persisting state failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No report with this id in history.
    #[error("no scan with id {0} in history")]
    NotFound(i64),

    /// An operation needed a current report but none is displayed.
    #[error("no scan results to use")]
    NoCurrentReport,

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using allerscan Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes for the command-line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command succeeded and nothing was flagged
    Success = 0,
    /// A scan flagged at least one declared allergen
    AllergensFound = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
    /// No usable text could be acquired
    ScanFailed = 4,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::InvalidAllergen(_) => {
                ExitCode::ConfigError
            }
            Error::NotFound(_) | Error::NoCurrentReport => ExitCode::ConfigError,
            Error::Acquisition(_) | Error::Scan(_) => ExitCode::ScanFailed,
            Error::Io { .. } | Error::Storage(_) | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
